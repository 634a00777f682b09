//! HTML form payloads validated before they reach the services.

pub mod constancia;
pub mod product;
pub mod user;
