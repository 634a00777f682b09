use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tera::Tera;

use crate::db::DbPool;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pdf;
use crate::repository::constancia::DieselConstanciaRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::report as report_service;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub year: Option<i32>,
}

#[get("/reports")]
pub async fn show_report(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ReportQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);

    let report = match report_service::monthly_report(&repo, &user, query.year) {
        Ok(report) => report,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(e) => {
            log::error!("Failed to compute report: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "reports",
        &server_config.auth_service_url,
    );
    context.insert("report", &report);

    render_template(&tera, "reports/index.html", &context)
}

/// Report export for the rendering frontend.
#[get("/reports/pdf")]
pub async fn report_pdf(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ReportQuery>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);

    let report = match report_service::monthly_report(&repo, &user, query.year) {
        Ok(report) => report,
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to compute report: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let today = Utc::now().date_naive();
    HttpResponse::Ok().json(json!({
        "filename": format!("informe_constancias_{}.pdf", report.year),
        "document": pdf::monthly_report(&report.rows, &report.totals, today),
    }))
}
