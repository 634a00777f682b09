use crate::dto::api::{ConstanciasQuery, ConstanciasResponse};
use crate::dto::main::IndexQuery;
use crate::listing::{DEFAULT_ITEMS_PER_PAGE, matches, paginate};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ConstanciaListQuery, ConstanciaReader};
use crate::routes::check_role;
use crate::services::main::controls_from_query;
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, PLANILLERO_ROLE, USUARIO_ROLE};

/// Returns the filtered list of requests visible to the authenticated user.
/// With a `page` parameter the result is one page; without it the whole
/// filtered set is returned.
pub fn list_constancias<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ConstanciasQuery,
) -> ServiceResult<ConstanciasResponse>
where
    R: ConstanciaReader + ?Sized,
{
    let query = if check_role(ADMIN_ROLE, &user.roles) || check_role(PLANILLERO_ROLE, &user.roles) {
        ConstanciaListQuery::new()
    } else if check_role(USUARIO_ROLE, &user.roles) {
        let user_id = user.user_id().ok_or(ServiceError::Unauthorized)?;
        ConstanciaListQuery::new().for_user(user_id)
    } else {
        return Err(ServiceError::Unauthorized);
    };

    let records = repo.list(query).map_err(ServiceError::from)?;

    let controls = controls_from_query(&IndexQuery {
        q: params.search,
        tipo: params.tipo,
        estado: params.estado,
        page: None,
    });

    match params.page {
        Some(page) => {
            let paginated = paginate(&records, &controls, DEFAULT_ITEMS_PER_PAGE, page);
            Ok(ConstanciasResponse {
                total: paginated.total_items,
                constancias: paginated.items,
            })
        }
        None => {
            let constancias: Vec<_> = records
                .into_iter()
                .filter(|record| matches(record, &controls))
                .collect();
            Ok(ConstanciasResponse {
                total: constancias.len(),
                constancias,
            })
        }
    }
}
