use validator::Validate;

use crate::domain::user::{NewUser, UpdateUser, User, UserRole};
use crate::forms::user::{AddUserForm, SaveUserForm};
use crate::listing::{DEFAULT_ITEMS_PER_PAGE, ListControls, Paginated, paginate};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{UserReader, UserWriter};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::ADMIN_ROLE;

/// Query parameters accepted by the users panel.
#[derive(Debug, Default, serde::Deserialize)]
pub struct UsersQuery {
    pub q: Option<String>,
    pub role: Option<String>,
    pub page: Option<usize>,
}

/// Loads the users panel. Admin only.
pub fn load_users_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: UsersQuery,
) -> ServiceResult<Paginated<User>>
where
    R: UserReader + ?Sized,
{
    if !check_role(ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let users = repo.list().map_err(ServiceError::from)?;

    let mut controls = ListControls::new(&["role"]);
    if let Some(q) = &query.q {
        controls = controls.with_search(q.trim());
    }
    if let Some(role) = query.role.as_deref().filter(|s| !s.is_empty()) {
        controls.select("role", role);
    }

    let page = query.page.unwrap_or(1);
    Ok(paginate(&users, &controls, DEFAULT_ITEMS_PER_PAGE, page))
}

/// Registers an account by hand, e.g. before the person first signs in.
/// Admin only.
pub fn add_user<R>(repo: &R, user: &AuthenticatedUser, form: AddUserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    if !check_role(ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }
    form.validate()?;

    let role = UserRole::try_from(form.role.as_str())?;
    let new_user = NewUser::new(form.email, form.name, role)?;

    repo.create_or_update(&new_user).map_err(ServiceError::from)
}

/// Renames an account or changes its role. Admin only; an admin cannot
/// demote their own account, so the panel always keeps at least one admin
/// signed in.
pub fn save_user<R>(repo: &R, user: &AuthenticatedUser, form: SaveUserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    if !check_role(ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }
    form.validate()?;

    let role = UserRole::try_from(form.role.as_str())?;
    if user.user_id() == Some(form.id) && role != UserRole::Admin {
        return Err(ServiceError::Form(
            "No puede quitarse su propio rol de administrador".to_string(),
        ));
    }

    let updates = UpdateUser::new(form.name, role)?;
    repo.update(form.id, &updates).map_err(ServiceError::from)
}

/// Removes an account and its products. Admin only; self-deletion is
/// rejected.
pub fn delete_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    if !check_role(ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }
    if user.user_id() == Some(id) {
        return Err(ServiceError::Form(
            "No puede eliminar su propia cuenta".to_string(),
        ));
    }

    repo.delete(id).map_err(ServiceError::from)
}

/// Synchronizes the signed-in account into the local users table. New
/// accounts start as `usuario`; an existing role is left untouched.
pub fn sync_account<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let new_user = NewUser::new(user.email.clone(), user.name.clone(), UserRole::Usuario)?;
    repo.create_or_update(&new_user).map_err(ServiceError::from)
}
