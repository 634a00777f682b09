//! Per-user product inventory records.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, TypeConstraintError};
use crate::listing::Filterable;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i32,
    /// Owning user account.
    pub user_id: i32,
    pub name: String,
    pub price: f64,
    pub sold_units: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Revenue from this product so far.
    pub fn profit(&self) -> f64 {
        self.price * f64::from(self.sold_units)
    }
}

impl Filterable for Product {
    fn searchable_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str())]
    }

    fn category(&self, _name: &str) -> Option<&str> {
        None
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub user_id: i32,
    pub name: String,
    pub price: f64,
    pub sold_units: i32,
}

impl NewProduct {
    pub fn new(
        user_id: i32,
        name: String,
        price: f64,
        sold_units: i32,
    ) -> Result<Self, TypeConstraintError> {
        if !price.is_finite() || price < 0.0 {
            return Err(TypeConstraintError::InvalidValue(
                "price must be non-negative".to_string(),
            ));
        }
        if sold_units < 0 {
            return Err(TypeConstraintError::InvalidValue(
                "sold units must be non-negative".to_string(),
            ));
        }
        Ok(Self {
            user_id,
            name: NonEmptyString::new(name)?.into_inner(),
            price,
            sold_units,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: String,
    pub price: f64,
    pub sold_units: i32,
}

impl UpdateProduct {
    pub fn new(name: String, price: f64, sold_units: i32) -> Result<Self, TypeConstraintError> {
        if !price.is_finite() || price < 0.0 {
            return Err(TypeConstraintError::InvalidValue(
                "price must be non-negative".to_string(),
            ));
        }
        if sold_units < 0 {
            return Err(TypeConstraintError::InvalidValue(
                "sold units must be non-negative".to_string(),
            ));
        }
        Ok(Self {
            name: NonEmptyString::new(name)?.into_inner(),
            price,
            sold_units,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_is_price_times_units() {
        let product = NewProduct::new(1, "Cafe".into(), 2.5, 4).unwrap();
        assert_eq!(product.price * f64::from(product.sold_units), 10.0);
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(NewProduct::new(1, "Cafe".into(), -1.0, 0).is_err());
        assert!(NewProduct::new(1, "Cafe".into(), f64::NAN, 0).is_err());
    }
}
