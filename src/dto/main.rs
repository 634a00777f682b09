use serde::Deserialize;

use crate::domain::constancia::Constancia;
use crate::listing::Paginated;

/// Query parameters accepted by the constancias index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Free-text search over nombre, apellidos and documento.
    pub q: Option<String>,
    /// Tipo selector value; `todos` or absent means no narrowing.
    pub tipo: Option<String>,
    /// Estado selector value; `todos` or absent means no narrowing.
    pub estado: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the constancias index template.
pub struct IndexPageData {
    /// Paginated window of the filtered collection.
    pub constancias: Paginated<Constancia>,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
    /// Selector values echoed back to the template.
    pub tipo: String,
    pub estado: String,
}
