use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ProductReader, ProductWriter};

/// Diesel implementation of the product repository traits.
pub struct DieselProductRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselProductRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl ProductReader for DieselProductRepository<'_> {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.pool.get()?;
        let row = products::table
            .find(id)
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_by_user(&self, user_id: i32) -> RepositoryResult<Vec<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.pool.get()?;
        let rows = products::table
            .filter(products::user_id.eq(user_id))
            .order(products::sold_units.desc())
            .load::<DbProduct>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ProductWriter for DieselProductRepository<'_> {
    fn create(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
        use crate::schema::products;

        let mut conn = self.pool.get()?;
        let insertable: DbNewProduct = product.into();

        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update(&self, id: i32, updates: &UpdateProduct) -> RepositoryResult<Product> {
        use crate::models::product::{Product as DbProduct, UpdateProduct as DbUpdateProduct};
        use crate::schema::products;

        let mut conn = self.pool.get()?;
        let changeset = DbUpdateProduct::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(products::table.find(id))
            .set(&changeset)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.pool.get()?;
        let affected = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
