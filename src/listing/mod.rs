//! Filtered pagination pipeline.
//!
//! Every list screen composes the same four pieces: a filter predicate over
//! declared record fields, an injectable control state, a pagination window,
//! and a combiner that re-derives the visible page whenever the collection
//! or any control changes. The pieces live here once instead of being
//! re-implemented per screen.

pub mod controls;
pub mod filter;
pub mod pagination;
pub mod pipeline;

pub use controls::ListControls;
pub use filter::{ALL, Filterable, matches};
pub use pagination::{DEFAULT_ITEMS_PER_PAGE, PageState, Paginated, total_pages, visible_pages};
pub use pipeline::{ControlInput, ListingPipeline, ListingView, SEARCH_DEBOUNCE, SourceEvent};

/// One-shot form of the pipeline for request/response handlers: filters the
/// records with the given controls and returns the requested page. A page
/// beyond the filtered range falls back to the first page, mirroring the
/// reset-on-shrink rule of the interactive pipeline.
pub fn paginate<T: Filterable + Clone>(
    records: &[T],
    controls: &ListControls,
    page_size: usize,
    page: usize,
) -> Paginated<T> {
    let filtered: Vec<T> = records
        .iter()
        .filter(|record| matches(*record, controls))
        .cloned()
        .collect();
    let total = total_pages(filtered.len(), page_size);
    let page = match page.max(1) {
        p if p > total => 1,
        p => p,
    };
    let items = pagination::slice(&filtered, page_size, page).to_vec();
    Paginated::new(items, page, total, filtered.len())
}
