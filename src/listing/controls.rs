//! User-editable filter values driving a listing.
//!
//! Each screen owns its own `ListControls` instance; nothing here is global,
//! so two instances of the same screen never share filter state.

use std::collections::BTreeMap;

use crate::listing::filter::ALL;

/// The current search text and categorical selections for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListControls {
    pub search: String,
    /// Selected value per categorical field, keyed by field name. The
    /// sentinel [`ALL`] means the field does not restrict the result.
    pub selections: BTreeMap<String, String>,
}

impl ListControls {
    /// Neutral controls for the given categorical fields: empty search,
    /// every selector on [`ALL`].
    pub fn new(categories: &[&str]) -> Self {
        Self {
            search: String::new(),
            selections: categories
                .iter()
                .map(|name| (name.to_string(), ALL.to_string()))
                .collect(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets a categorical selection. Unknown field names are accepted so a
    /// stale form parameter cannot panic the screen; they simply become an
    /// active selector no record satisfies.
    pub fn select(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.selections.insert(name.into(), value.into());
    }

    pub fn selected(&self, name: &str) -> &str {
        self.selections.get(name).map(String::as_str).unwrap_or(ALL)
    }

    /// True when no search text and no active categorical selection.
    pub fn is_neutral(&self) -> bool {
        self.search.trim().is_empty() && self.selections.values().all(|v| v == ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let controls = ListControls::new(&["tipo", "estado"]);
        assert!(controls.is_neutral());
        assert_eq!(controls.selected("tipo"), ALL);
        assert_eq!(controls.selected("unknown"), ALL);
    }

    #[test]
    fn selecting_a_value_leaves_neutral() {
        let mut controls = ListControls::new(&["tipo"]);
        controls.select("tipo", "LABORAL");
        assert!(!controls.is_neutral());
        assert_eq!(controls.selected("tipo"), "LABORAL");
    }
}
