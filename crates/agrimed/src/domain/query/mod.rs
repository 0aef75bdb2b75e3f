//! Catalog Query Model
//!
//! Everything a listing endpoint needs to describe *which* listings it wants,
//! in what order, and which window of them:
//!
//! - `filter`: structured constraints (Filter Builder)
//! - `search`: free-text OR-match across text fields (Search Ranker)
//! - `sort`: ordering with a deterministic tie-breaker
//! - `pagination`: page windows and the metadata envelope
//!
//! A `CatalogQuery` is the single predicate handed to a store. The same value is
//! used for the page query and for the total count, so the two cannot drift.

mod filter;
mod pagination;
mod search;
mod sort;

pub use filter::*;
pub use pagination::*;
pub use search::*;
pub use sort::*;

use serde::Serialize;

use crate::domain::entities::MedicineListing;

/// Combined predicate: every filter constraint AND (if present) the text search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub filter: CatalogFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<TextSearch>,
}

impl CatalogQuery {
    pub fn new(filter: CatalogFilter) -> Self {
        Self {
            filter,
            search: None,
        }
    }

    /// Narrow this query with a text search. Structured filters are kept.
    pub fn with_search(mut self, search: TextSearch) -> Self {
        self.search = Some(search);
        self
    }

    /// Evaluate the predicate in-process
    pub fn matches(&self, listing: &MedicineListing) -> bool {
        self.filter.matches(listing)
            && self
                .search
                .as_ref()
                .map_or(true, |search| search.matches(listing))
    }
}

/// Case-insensitive literal substring test
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}


#[cfg(test)]
mod tests {
    use super::fixtures::copper_fungicide;
    use super::*;
    use crate::domain::value_objects::MedicineType;

    #[test]
    fn test_search_narrows_within_filter() {
        let listing = copper_fungicide();
        let filter = CatalogFilter::from_params(FilterParams {
            medicine_type: Some(MedicineType::Fungicide),
            ..Default::default()
        });
        let query = CatalogQuery::new(filter).with_search(TextSearch::new("copper").unwrap());

        // Text matches, structured filter does not: AND semantics reject it
        assert!(!query.matches(&listing));
    }

    #[test]
    fn test_search_and_filter_both_match() {
        let listing = copper_fungicide();
        let query = CatalogQuery::new(CatalogFilter::from_params(FilterParams::default()))
            .with_search(TextSearch::new("SULFATE").unwrap());
        assert!(query.matches(&listing));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Des Moines", "moin"));
        assert!(!contains_ignore_case("Des Moines", "paris"));
    }
}
