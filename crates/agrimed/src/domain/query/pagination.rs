//! Pagination Engine
//!
//! Converts `(page, limit)` into an offset window and computes the metadata
//! block every paginated listing returns.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::errors::FieldError;

/// Default page size for catalog listings
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Default size of the featured list
pub const FEATURED_LIMIT: u32 = 10;
/// Default page size for AI exchange history
pub const HISTORY_PAGE_LIMIT: u32 = 10;
/// Largest page a caller may request
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A validated page window. `page >= 1`, `1 <= limit <= MAX_PAGE_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate raw query values, falling back to page 1 and `default_limit`
    pub fn from_query(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: u32,
    ) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let page = match page {
            None => 1,
            Some(p) if p >= 1 && p <= u32::MAX as i64 => p as u32,
            Some(_) => {
                errors.push(FieldError::new("page", "page must be greater than or equal to 1"));
                1
            }
        };

        let limit = match limit {
            None => default_limit,
            Some(l) if (1..=MAX_PAGE_LIMIT as i64).contains(&l) => l as u32,
            Some(_) => {
                errors.push(FieldError::new(
                    "limit",
                    format!("limit must be between 1 and {}", MAX_PAGE_LIMIT),
                ));
                default_limit
            }
        };

        if errors.is_empty() {
            Ok(Self { page, limit })
        } else {
            Err(errors)
        }
    }

    /// First page with the given size (clamped into the accepted range)
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// Pagination block of a listing response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// `totalPages = ceil(total / limit)`; zero items means zero pages
    pub fn compute(request: &PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.limit as u64);
        Self {
            current_page: request.page,
            total_pages,
            total_items,
            has_next_page: (request.page as u64) < total_pages,
            has_prev_page: request.page > 1,
        }
    }
}

/// One page of results with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::compute(request, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: i64, limit: i64) -> PageRequest {
        PageRequest::from_query(Some(page), Some(limit), DEFAULT_PAGE_LIMIT).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = PageRequest::from_query(None, None, DEFAULT_PAGE_LIMIT).unwrap();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 20);
        assert_eq!(req.offset(), 0);

        let history = PageRequest::from_query(None, None, HISTORY_PAGE_LIMIT).unwrap();
        assert_eq!(history.limit(), 10);
    }

    #[test]
    fn test_offset() {
        assert_eq!(request(3, 20).offset(), 40);
        assert_eq!(request(1, 7).offset(), 0);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let errors = PageRequest::from_query(Some(0), Some(101), DEFAULT_PAGE_LIMIT).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["page", "limit"]);

        assert!(PageRequest::from_query(Some(-2), None, DEFAULT_PAGE_LIMIT).is_err());
        assert!(PageRequest::from_query(None, Some(0), DEFAULT_PAGE_LIMIT).is_err());
    }

    #[test]
    fn test_meta_for_empty_result() {
        let meta = PaginationMeta::compute(&request(1, 20), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_meta_matches_ceil_division() {
        for total in 0..=45u64 {
            for limit in 1..=7i64 {
                for page in 1..=10i64 {
                    let req = request(page, limit);
                    let meta = PaginationMeta::compute(&req, total);
                    let expected_pages = (total + limit as u64 - 1) / limit as u64;
                    assert_eq!(meta.total_pages, expected_pages);
                    assert_eq!(meta.has_next_page, (page as u64) < expected_pages);
                    assert_eq!(meta.has_prev_page, page > 1);
                }
            }
        }
    }

    #[test]
    fn test_beyond_last_page_is_not_an_error() {
        let meta = PaginationMeta::compute(&request(9, 10), 15);
        assert_eq!(meta.current_page, 9);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_first_clamps_limit() {
        assert_eq!(PageRequest::first(0).limit(), 1);
        assert_eq!(PageRequest::first(500).limit(), MAX_PAGE_LIMIT);
    }
}
