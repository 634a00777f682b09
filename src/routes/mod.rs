//! Route handlers and the helpers shared between them.

use actix_identity::Identity;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::Tera;

use crate::models::auth::AuthenticatedUser;

pub mod api;
pub mod constancia;
pub mod main;
pub mod products;
pub mod reports;
pub mod users;

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Template context shared by all pages: flash alerts, the signed-in user
/// and the link back to the auth service.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    active_menu: &str,
    auth_service_url: &str,
) -> tera::Context {
    let alerts: Vec<_> = flash_messages
        .iter()
        .map(|m| (m.content().to_string(), alert_level_to_str(&m.level())))
        .collect();

    let mut context = tera::Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("active_menu", active_menu);
    context.insert("auth_service_url", auth_service_url);
    context
}

pub fn render_template(tera: &Tera, name: &str, context: &tera::Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            log::error!("Failed to render template {name}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Landing page for signed-in accounts that have no role assigned yet.
#[get("/na")]
pub async fn not_assigned(tera: actix_web::web::Data<Tera>) -> impl Responder {
    render_template(&tera, "main/not_assigned.html", &tera::Context::new())
}

#[get("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
        FlashMessage::success("Sesión cerrada.").send();
    }
    redirect("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_role_matches_exactly() {
        let roles = vec!["usuario".to_string(), "planillero".to_string()];
        assert!(check_role("usuario", &roles));
        assert!(!check_role("admin", &roles));
        assert!(!check_role("usu", &roles));
    }

    #[test]
    fn alert_levels_map_to_bootstrap_classes() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
    }
}
