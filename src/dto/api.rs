//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::constancia::Constancia;

/// Query parameters accepted by the `/api/v1/constancias` service.
#[derive(Debug, Default)]
pub struct ConstanciasQuery {
    /// Optional free-form search string.
    pub search: Option<String>,
    /// Optional tipo selector value.
    pub tipo: Option<String>,
    /// Optional estado selector value.
    pub estado: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`crate::services::api::list_constancias`].
#[derive(Debug, Serialize)]
pub struct ConstanciasResponse {
    /// Total number of requests matching the filter.
    pub total: usize,
    /// Page of requests selected by the caller.
    pub constancias: Vec<Constancia>,
}
