use validator::Validate;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::dto::product::ProductsPageData;
use crate::forms::product::{AddProductForm, SaveProductForm};
use crate::listing::{DEFAULT_ITEMS_PER_PAGE, ListControls, paginate};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the products page.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProductsQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
}

fn owned_product<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;
    if user.user_id() != Some(product.user_id) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(product)
}

/// Loads the signed-in user's products, best sellers first. The profit
/// total covers the whole inventory, not just the visible page.
pub fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + ?Sized,
{
    let user_id = user.user_id().ok_or(ServiceError::Unauthorized)?;
    let products = repo.list_by_user(user_id).map_err(ServiceError::from)?;

    let total_profit = products.iter().map(Product::profit).sum();

    let mut controls = ListControls::new(&[]);
    if let Some(q) = &query.q {
        controls = controls.with_search(q.trim());
    }

    let page = query.page.unwrap_or(1);
    Ok(ProductsPageData {
        products: paginate(&products, &controls, DEFAULT_ITEMS_PER_PAGE, page),
        total_profit,
    })
}

pub fn add_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    form.validate()?;
    let user_id = user.user_id().ok_or(ServiceError::Unauthorized)?;
    let new_product = NewProduct::new(user_id, form.name, form.price, form.sold_units)?;

    repo.create(&new_product).map_err(ServiceError::from)
}

pub fn save_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    form.validate()?;
    owned_product(repo, user, form.id)?;

    let updates = UpdateProduct::new(form.name, form.price, form.sold_units)?;
    repo.update(form.id, &updates).map_err(ServiceError::from)
}

pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    owned_product(repo, user, id)?;
    repo.delete(id).map_err(ServiceError::from)
}

/// All products of the signed-in user for the summary sheet, unfiltered.
pub fn list_own_products<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let user_id = user.user_id().ok_or(ServiceError::Unauthorized)?;
    repo.list_by_user(user_id).map_err(ServiceError::from)
}
