use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::db::establish_connection_pool;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::routes::api::api_v1_constancias;
use crate::routes::constancia::{
    constancia_pdf, delete_constancia, show_constancia, update_estado,
};
use crate::routes::main::{add_constancia, show_index};
use crate::routes::products::{
    add_product, delete_product, product_pdf, products_summary_pdf, save_product, show_products,
};
use crate::routes::reports::{report_pdf, show_report};
use crate::routes::users::{add_user, delete_user, save_user, show_users};
use crate::routes::{logout, not_assigned};
use crate::zmq::{ZmqSender, ZmqSenderOptions};

pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod listing;
pub mod middleware;
pub mod models;
pub mod pdf;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod zmq;

pub const ADMIN_ROLE: &str = "admin";
pub const PLANILLERO_ROLE: &str = "planillero";
pub const USUARIO_ROLE: &str = "usuario";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Start a background ZeroMQ publisher used for outbound email notifications.
    let zmq_sender = ZmqSender::start(ZmqSenderOptions::pub_default(
        &server_config.zmq_emailer_pub,
    ))
    .map_err(|e| std::io::Error::other(format!("Failed to start ZMQ sender: {e}")))?;

    let zmq_sender = Arc::new(zmq_sender);

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(web::scope("/api").service(api_v1_constancias))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(add_constancia)
                    .service(update_estado)
                    .service(show_constancia)
                    .service(delete_constancia)
                    .service(constancia_pdf)
                    .service(show_users)
                    .service(add_user)
                    .service(save_user)
                    .service(delete_user)
                    .service(show_products)
                    .service(add_product)
                    .service(save_product)
                    .service(delete_product)
                    .service(products_summary_pdf)
                    .service(product_pdf)
                    .service(show_report)
                    .service(report_pdf)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(zmq_sender.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
