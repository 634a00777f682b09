//! Filter predicate evaluation.
//!
//! Each record type declares which of its fields participate in free-text
//! search and which behave as categorical selectors. The evaluator itself is
//! schema-agnostic: it only sees the declared fields, so every screen shares
//! one matching contract instead of hand-rolling its own copy.

use std::borrow::Cow;

use crate::listing::controls::ListControls;

/// Sentinel selector value meaning "no categorical restriction".
pub const ALL: &str = "todos";

/// A record that can be filtered by the listing pipeline.
pub trait Filterable {
    /// Values included in the free-text haystack. Fields without a value
    /// should simply be omitted; they behave as empty strings.
    fn searchable_fields(&self) -> Vec<Cow<'_, str>>;

    /// Current value of the named categorical field, or `None` when the
    /// record has no such field.
    fn category(&self, name: &str) -> Option<&str>;
}

/// Returns true iff the record satisfies the search term and every active
/// categorical selection.
///
/// The search term is trimmed and matched case-insensitively as a substring
/// of the joined searchable fields; an empty term matches everything. A
/// selection equal to [`ALL`] is inactive; any other value requires exact
/// equality with the record's field, and a missing field never matches.
pub fn matches<T: Filterable>(record: &T, controls: &ListControls) -> bool {
    let needle = controls.search.trim().to_lowercase();
    if !needle.is_empty() {
        let haystack = record
            .searchable_fields()
            .iter()
            .map(|f| f.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        if !haystack.contains(&needle) {
            return false;
        }
    }

    controls
        .selections
        .iter()
        .filter(|(_, selected)| selected.as_str() != ALL)
        .all(|(name, selected)| record.category(name) == Some(selected.as_str()))
}
