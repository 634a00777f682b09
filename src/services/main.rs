use crate::domain::constancia::Constancia;
use crate::dto::main::{IndexPageData, IndexQuery};
use crate::listing::{DEFAULT_ITEMS_PER_PAGE, ListControls, paginate};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ConstanciaListQuery, ConstanciaReader};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, PLANILLERO_ROLE, USUARIO_ROLE};

/// Builds the control state out of the raw index query parameters. An absent
/// or empty selector parameter leaves the selector on the neutral sentinel.
pub fn controls_from_query(query: &IndexQuery) -> ListControls {
    let mut controls = ListControls::new(&["tipo", "estado"]);
    if let Some(q) = &query.q {
        controls = controls.with_search(q.trim());
    }
    if let Some(tipo) = query.tipo.as_deref().filter(|s| !s.is_empty()) {
        controls.select("tipo", tipo);
    }
    if let Some(estado) = query.estado.as_deref().filter(|s| !s.is_empty()) {
        controls.select("estado", estado);
    }
    controls
}

/// Loads the constancias list for the index page.
///
/// Reviewers see the whole collection; a regular user only sees their own
/// requests. Filtering and pagination run over the fetched snapshot.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<IndexPageData>
where
    R: ConstanciaReader + ?Sized,
{
    let list_query = if check_role(ADMIN_ROLE, &user.roles) || check_role(PLANILLERO_ROLE, &user.roles)
    {
        ConstanciaListQuery::new()
    } else if check_role(USUARIO_ROLE, &user.roles) {
        let user_id = user.user_id().ok_or(ServiceError::Unauthorized)?;
        ConstanciaListQuery::new().for_user(user_id)
    } else {
        return Err(ServiceError::Unauthorized);
    };

    let constancias: Vec<Constancia> = repo.list(list_query).map_err(ServiceError::from)?;

    let controls = controls_from_query(&query);
    let page = query.page.unwrap_or(1);
    let paginated = paginate(&constancias, &controls, DEFAULT_ITEMS_PER_PAGE, page);

    let search_query = Some(controls.search.clone()).filter(|s| !s.is_empty());
    let tipo = controls.selected("tipo").to_string();
    let estado = controls.selected("estado").to_string();

    Ok(IndexPageData {
        constancias: paginated,
        search_query,
        tipo,
        estado,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ALL;

    #[test]
    fn empty_selector_params_stay_neutral() {
        let query = IndexQuery {
            q: Some("  ana  ".to_string()),
            tipo: Some(String::new()),
            estado: None,
            page: None,
        };
        let controls = controls_from_query(&query);
        assert_eq!(controls.search, "ana");
        assert_eq!(controls.selected("tipo"), ALL);
        assert_eq!(controls.selected("estado"), ALL);
    }

    #[test]
    fn selector_params_narrow_controls() {
        let query = IndexQuery {
            q: None,
            tipo: Some("LABORAL".to_string()),
            estado: Some("pendiente".to_string()),
            page: Some(2),
        };
        let controls = controls_from_query(&query);
        assert!(!controls.is_neutral());
        assert_eq!(controls.selected("tipo"), "LABORAL");
    }
}
