use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::db::DbPool;
use crate::domain::constancia::{ConstanciaEstado, ConstanciaTipo};
use crate::dto::main::IndexQuery;
use crate::forms::constancia::CreateConstanciaForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::constancia::DieselConstanciaRepository;
use crate::repository::user::DieselUserRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::constancia as constancia_service;
use crate::services::main as main_service;
use crate::services::user as user_service;

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<IndexQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    // Keep the local account record in sync with the auth service claims.
    let user_repo = DieselUserRepository::new(&pool);
    if let Err(e) = user_service::sync_account(&user_repo, &user) {
        log::error!("Failed to sync account {}: {e}", user.email);
    }

    let repo = DieselConstanciaRepository::new(&pool);
    let page_data = match main_service::load_index_page(&repo, &user, query.into_inner()) {
        Ok(page_data) => page_data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(e) => {
            log::error!("Failed to load constancias: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );
    context.insert("constancias", &page_data.constancias);
    context.insert("search_query", &page_data.search_query);
    context.insert("selected_tipo", &page_data.tipo);
    context.insert("selected_estado", &page_data.estado);
    context.insert(
        "tipos",
        &ConstanciaTipo::ALL
            .iter()
            .map(|t| (t.as_str(), t.label()))
            .collect::<Vec<_>>(),
    );
    context.insert(
        "estados",
        &ConstanciaEstado::ALL
            .iter()
            .map(|e| (e.as_str(), e.color()))
            .collect::<Vec<_>>(),
    );

    render_template(&tera, "main/index.html", &context)
}

#[post("/constancia/add")]
pub async fn add_constancia(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<CreateConstanciaForm>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);

    match constancia_service::create_constancia(&repo, &user, form) {
        Ok(_) => {
            FlashMessage::success("Constancia creada exitosamente.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::Form(msg)) | Err(ServiceError::TypeConstraint(msg)) => {
            FlashMessage::error(msg).send();
        }
        Err(e) => {
            log::error!("Failed to create constancia: {e}");
            FlashMessage::error("Error al crear la constancia").send();
        }
    }

    redirect("/")
}
