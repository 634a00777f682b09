//! Domain aggregates exposed by the service layer.

pub mod constancia;
pub mod product;
pub mod types;
pub mod user;
