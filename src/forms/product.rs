use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, message = "El nombre no puede estar vacío"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Las unidades no pueden ser negativas"))]
    pub sold_units: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveProductForm {
    pub id: i32,
    #[validate(length(min = 1, message = "El nombre no puede estar vacío"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Las unidades no pueden ser negativas"))]
    pub sold_units: i32,
}
