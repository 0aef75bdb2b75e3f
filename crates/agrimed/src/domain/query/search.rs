//! Search Ranker (lexical)
//!
//! Free-text search as an OR of case-insensitive substring matches over
//! `name`, `description`, `activeIngredient` and each tag. No scoring: results
//! keep the caller's sort order.

use serde::Serialize;

use super::contains_ignore_case;
use crate::domain::entities::MedicineListing;
use crate::domain::errors::DomainError;

/// A non-empty, trimmed search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextSearch {
    term: String,
}

impl TextSearch {
    /// Validate a required search term
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let term = raw.trim();
        if term.is_empty() {
            return Err(DomainError::validation("Search query is required"));
        }
        Ok(Self {
            term: term.to_string(),
        })
    }

    /// Optional search term: blank input means no search
    pub fn optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|r| Self::new(r).ok())
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches(&self, listing: &MedicineListing) -> bool {
        contains_ignore_case(&listing.name, &self.term)
            || contains_ignore_case(&listing.description, &self.term)
            || contains_ignore_case(&listing.active_ingredient, &self.term)
            || listing
                .tags
                .iter()
                .any(|tag| contains_ignore_case(tag, &self.term))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::copper_fungicide;
    use super::*;

    #[test]
    fn test_blank_query_is_rejected() {
        for raw in ["", "   ", "\t\n"] {
            let err = TextSearch::new(raw).unwrap_err();
            assert_eq!(err.to_string(), "Search query is required");
        }
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(TextSearch::new("  blight ").unwrap().term(), "blight");
        assert_eq!(TextSearch::optional(Some(" ")), None);
        assert_eq!(TextSearch::optional(None), None);
    }

    #[test]
    fn test_matches_any_text_field() {
        let listing = copper_fungicide();
        // name
        assert!(TextSearch::new("fungicide pro").unwrap().matches(&listing));
        // description
        assert!(TextSearch::new("LATE BLIGHT").unwrap().matches(&listing));
        // active ingredient
        assert!(TextSearch::new("pentahydrate").unwrap().matches(&listing));
        // partial tag
        assert!(TextSearch::new("organ").unwrap().matches(&listing));
        assert!(!TextSearch::new("neem").unwrap().matches(&listing));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let mut listing = copper_fungicide();
        assert!(!TextSearch::new("c.pper").unwrap().matches(&listing));
        listing.name = "Mix (50%) [fast]".to_string();
        assert!(TextSearch::new("(50%)").unwrap().matches(&listing));
    }
}
