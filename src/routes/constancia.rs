use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use chrono::Utc;
use serde_json::json;
use tera::Tera;

use crate::db::DbPool;
use crate::domain::constancia::ConstanciaEstado;
use crate::forms::constancia::UpdateEstadoForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::constancia::DieselConstanciaRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::constancia as constancia_service;
use crate::zmq::ZmqSender;

#[get("/constancia/{constancia_id}")]
pub async fn show_constancia(
    constancia_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);

    let constancia =
        match constancia_service::get_constancia(&repo, &user, constancia_id.into_inner()) {
            Ok(constancia) => constancia,
            Err(ServiceError::NotFound) => {
                FlashMessage::error("Constancia no encontrada.").send();
                return redirect("/");
            }
            Err(ServiceError::Unauthorized) => return redirect("/na"),
            Err(e) => {
                log::error!("Failed to get constancia: {e}");
                return HttpResponse::InternalServerError().finish();
            }
        };

    let mut context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );
    context.insert("constancia", &constancia);
    context.insert("estado_color", constancia.estado.color());

    render_template(&tera, "constancia/show.html", &context)
}

/// Picks the single toast shown after a review decision. An approval that
/// failed to reach the emailer reports the failure instead of a success.
fn decision_feedback(estado: ConstanciaEstado, email_failed: bool) -> (Level, &'static str) {
    match (estado, email_failed) {
        (ConstanciaEstado::Aprobada, false) => {
            (Level::Success, "Constancia enviada al correo electrónico.")
        }
        (ConstanciaEstado::Aprobada, true) => {
            (Level::Error, "Error al enviar la constancia por correo")
        }
        _ => (Level::Success, "Estado actualizado correctamente."),
    }
}

#[post("/constancia/estado")]
pub async fn update_estado(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
    zmq_sender: web::Data<Arc<ZmqSender>>,
    web::Form(form): web::Form<UpdateEstadoForm>,
) -> impl Responder {
    let estado = match ConstanciaEstado::try_from(form.estado.as_str()) {
        Ok(estado) => estado,
        Err(e) => {
            log::error!("Rejected estado value: {e}");
            FlashMessage::error("Estado inválido.").send();
            return redirect("/");
        }
    };

    let repo = DieselConstanciaRepository::new(&pool);

    let constancia = match constancia_service::set_estado(&repo, &user, form.id, estado) {
        Ok(constancia) => constancia,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Constancia no encontrada.").send();
            return redirect("/");
        }
        Err(ServiceError::Form(msg)) => {
            FlashMessage::error(msg).send();
            return redirect("/");
        }
        Err(e) => {
            log::error!("Failed to update estado: {e}");
            FlashMessage::error("Error al actualizar el estado").send();
            return redirect("/");
        }
    };

    let mut email_failed = false;
    if estado == ConstanciaEstado::Aprobada {
        let today = Utc::now().date_naive();
        match constancia_service::approval_message(&tera, &constancia, today) {
            Ok(message) => {
                if let Err(e) = zmq_sender.send(&message) {
                    log::error!("Failed to queue approval email: {e}");
                    email_failed = true;
                }
            }
            Err(e) => {
                log::error!("Failed to build approval email: {e}");
                email_failed = true;
            }
        }
    }

    let (level, message) = decision_feedback(estado, email_failed);
    match level {
        Level::Error => FlashMessage::error(message).send(),
        _ => FlashMessage::success(message).send(),
    }
    redirect("/")
}

#[post("/constancia/{constancia_id}/delete")]
pub async fn delete_constancia(
    constancia_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);

    match constancia_service::delete_constancia(&repo, &user, constancia_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Constancia eliminada.").send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Constancia no encontrada.").send();
            redirect("/")
        }
        Err(e) => {
            log::error!("Failed to delete constancia: {e}");
            FlashMessage::error("Error al eliminar la constancia").send();
            redirect("/")
        }
    }
}

/// Returns the certificate document definition for the rendering frontend,
/// along with the filename it should download as.
#[get("/constancia/{constancia_id}/pdf")]
pub async fn constancia_pdf(
    constancia_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);

    let constancia =
        match constancia_service::get_constancia(&repo, &user, constancia_id.into_inner()) {
            Ok(constancia) => constancia,
            Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
            Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
            Err(e) => {
                log::error!("Failed to get constancia: {e}");
                return HttpResponse::InternalServerError().finish();
            }
        };

    let today = Utc::now().date_naive();
    match constancia_service::certificate_document(&user, &constancia, today) {
        Ok((filename, document)) => HttpResponse::Ok().json(json!({
            "filename": filename,
            "document": document,
        })),
        Err(ServiceError::Form(msg)) => HttpResponse::UnprocessableEntity().json(json!({
            "error": msg,
        })),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to build certificate: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_approval_email_reports_a_single_error() {
        let (level, message) = decision_feedback(ConstanciaEstado::Aprobada, true);
        assert_eq!(level, Level::Error);
        assert!(message.contains("Error al enviar"));
    }

    #[test]
    fn successful_approval_reports_the_email_delivery() {
        let (level, message) = decision_feedback(ConstanciaEstado::Aprobada, false);
        assert_eq!(level, Level::Success);
        assert_eq!(message, "Constancia enviada al correo electrónico.");
    }

    #[test]
    fn rejection_reports_the_estado_change() {
        let (level, message) = decision_feedback(ConstanciaEstado::Rechazada, false);
        assert_eq!(level, Level::Success);
        assert_eq!(message, "Estado actualizado correctamente.");
    }
}
