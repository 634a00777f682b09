use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub price: f64,
    pub sold_units: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub price: f64,
    pub sold_units: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub price: f64,
    pub sold_units: i32,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(row: Product) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            price: row.price,
            sold_units: row.sold_units,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            user_id: product.user_id,
            name: product.name.as_str(),
            price: product.price,
            sold_units: product.sold_units,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn from_domain(update: &'a DomainUpdateProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            name: update.name.as_str(),
            price: update.price,
            sold_units: update.sold_units,
            updated_at,
        }
    }
}
