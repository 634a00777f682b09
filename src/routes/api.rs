use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::db::DbPool;
use crate::dto::api::ConstanciasQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::constancia::DieselConstanciaRepository;
use crate::services::ServiceError;
use crate::services::api as api_service;

#[derive(Debug, Deserialize)]
struct ApiV1ConstanciasQueryParams {
    query: Option<String>,
    tipo: Option<String>,
    estado: Option<String>,
    page: Option<usize>,
}

#[get("/v1/constancias")]
pub async fn api_v1_constancias(
    params: web::Query<ApiV1ConstanciasQueryParams>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselConstanciaRepository::new(&pool);
    let params = params.into_inner();

    let query = ConstanciasQuery {
        search: params.query,
        tipo: params.tipo,
        estado: params.estado,
        page: params.page,
    };

    match api_service::list_constancias(&repo, &user, query) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to list constancias: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
