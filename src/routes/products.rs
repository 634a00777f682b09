use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use serde_json::json;
use tera::Tera;

use crate::db::DbPool;
use crate::forms::product::{AddProductForm, SaveProductForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pdf;
use crate::repository::product::DieselProductRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::product::{self as product_service, ProductsQuery};

#[get("/products")]
pub async fn show_products(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ProductsQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = DieselProductRepository::new(&pool);

    let page_data = match product_service::load_products_page(&repo, &user, query.into_inner()) {
        Ok(page_data) => page_data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(e) => {
            log::error!("Failed to load products: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "products",
        &server_config.auth_service_url,
    );
    context.insert("products", &page_data.products);
    context.insert("total_profit", &page_data.total_profit);

    render_template(&tera, "products/index.html", &context)
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    let repo = DieselProductRepository::new(&pool);

    match product_service::add_product(&repo, &user, form) {
        Ok(_) => FlashMessage::success("Producto creado exitosamente.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::Form(msg)) | Err(ServiceError::TypeConstraint(msg)) => {
            FlashMessage::error(msg).send();
        }
        Err(e) => {
            log::error!("Failed to add product: {e}");
            FlashMessage::error("Error al crear el producto").send();
        }
    }

    redirect("/products")
}

#[post("/products/save")]
pub async fn save_product(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<SaveProductForm>,
) -> impl Responder {
    let repo = DieselProductRepository::new(&pool);

    match product_service::save_product(&repo, &user, form) {
        Ok(_) => FlashMessage::success("Producto actualizado exitosamente.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Producto no encontrado.").send(),
        Err(ServiceError::Form(msg)) | Err(ServiceError::TypeConstraint(msg)) => {
            FlashMessage::error(msg).send();
        }
        Err(e) => {
            log::error!("Failed to save product: {e}");
            FlashMessage::error("Error al actualizar el producto").send();
        }
    }

    redirect("/products")
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselProductRepository::new(&pool);

    match product_service::delete_product(&repo, &user, product_id.into_inner()) {
        Ok(()) => FlashMessage::success("Producto eliminado exitosamente.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Producto no encontrado.").send(),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            FlashMessage::error("Error al eliminar el producto").send();
        }
    }

    redirect("/products")
}

/// Detail sheet for one product.
#[get("/products/{product_id}/pdf")]
pub async fn product_pdf(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselProductRepository::new(&pool);

    let products = match product_service::list_own_products(&repo, &user) {
        Ok(products) => products,
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to load products: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let product_id = product_id.into_inner();
    match products.iter().find(|p| p.id == product_id) {
        Some(product) => HttpResponse::Ok().json(json!({
            "filename": format!("producto_{}.pdf", product.id),
            "document": pdf::product_detail(product),
        })),
        None => HttpResponse::NotFound().finish(),
    }
}

/// Summary sheet over all of the user's products.
#[get("/products/pdf")]
pub async fn products_summary_pdf(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselProductRepository::new(&pool);

    let products = match product_service::list_own_products(&repo, &user) {
        Ok(products) => products,
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to load products: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let today = Utc::now().date_naive();
    HttpResponse::Ok().json(json!({
        "filename": "resumen_productos.pdf",
        "document": pdf::products_summary(&user.name, &products, today),
    }))
}
