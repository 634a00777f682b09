//! Repository traits and query builders.
//!
//! Readers return full collection snapshots ordered like the screens expect
//! them; text search and categorical filtering happen downstream in the
//! listing pipeline, which works over already-fetched arrays.

use crate::domain::constancia::{Constancia, ConstanciaEstado, NewConstancia};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;

pub mod constancia;
pub mod errors;
pub mod product;
pub mod user;

/// Scope for a constancia collection fetch. The default fetches the whole
/// collection, newest first; `for_user` narrows to one requester.
#[derive(Debug, Clone, Default)]
pub struct ConstanciaListQuery {
    pub user_id: Option<i32>,
}

impl ConstanciaListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

pub trait ConstanciaReader {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Constancia>>;
    /// Full snapshot ordered by creation time, newest first.
    fn list(&self, query: ConstanciaListQuery) -> RepositoryResult<Vec<Constancia>>;
}

pub trait ConstanciaWriter {
    fn create(&self, nueva: &NewConstancia) -> RepositoryResult<Constancia>;
    fn set_estado(&self, id: i32, estado: ConstanciaEstado) -> RepositoryResult<Constancia>;
    fn delete(&self, id: i32) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    /// Full snapshot ordered by name.
    fn list(&self) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    /// Inserts the account or refreshes its name if the email already
    /// exists; an existing role is never downgraded by a login sync.
    fn create_or_update(&self, user: &NewUser) -> RepositoryResult<User>;
    fn update(&self, id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    fn delete(&self, id: i32) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    /// Products owned by the user, best sellers first.
    fn list_by_user(&self, user_id: i32) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create(&self, product: &NewProduct) -> RepositoryResult<Product>;
    fn update(&self, id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    fn delete(&self, id: i32) -> RepositoryResult<()>;
}
