//! Database and transport models shared across the service.

pub mod auth;
pub mod config;
pub mod constancia;
pub mod product;
pub mod user;
pub mod zmq;
