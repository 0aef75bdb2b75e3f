//! Marketplace query parameters and response payloads

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use agrimed::{
    CatalogFilter, Disease, FieldError, FilterParams, MedicineListing, MedicineSummary,
    MedicineType, PageRequest, PaginationMeta, Plant, SortField, SortOrder, SortSpec,
};

use crate::error::ApiError;

// ============================================
// Query Parameters
// ============================================

/// Filters, sorting and paging accepted by the listing and search endpoints.
/// Values arrive as raw text so each bad value is reported per field.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Page size, 1..=100
    pub limit: Option<String>,
    pub medicine_type: Option<String>,
    pub target_disease: Option<String>,
    pub target_plant: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub condition: Option<String>,
    /// Defaults to `Available`
    pub availability: Option<String>,
    /// Case-insensitive substring of the seller's city
    pub location: Option<String>,
    pub application_method: Option<String>,
    /// Case-insensitive substring of the active ingredient
    pub active_ingredient: Option<String>,
    /// createdAt, updatedAt, price, name or views
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
    /// Free-text search (listing endpoint)
    pub search: Option<String>,
    /// Search term (search endpoint)
    pub q: Option<String>,
    pub featured: Option<String>,
}

/// Paging and sorting for the dimension endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PagedQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Number of items, 1..=100
    pub limit: Option<String>,
}

/// Listing query after per-field validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedListing {
    pub filter: CatalogFilter,
    pub sort: SortSpec,
    pub page: PageRequest,
    pub search: Option<String>,
    pub q: Option<String>,
}

impl ListingQuery {
    pub fn parse(self, default_limit: u32) -> Result<ParsedListing, ApiError> {
        let mut fields = QueryFields::default();

        let params = FilterParams {
            availability: fields.vocabulary("availability", self.availability),
            medicine_type: fields.vocabulary("medicineType", self.medicine_type),
            application_method: fields.vocabulary("applicationMethod", self.application_method),
            condition: fields.vocabulary("condition", self.condition),
            target_disease: fields.vocabulary("targetDisease", self.target_disease),
            target_plant: fields.vocabulary("targetPlant", self.target_plant),
            min_price: fields.price("minPrice", self.min_price),
            max_price: fields.price("maxPrice", self.max_price),
            location: self.location,
            active_ingredient: self.active_ingredient,
            featured: fields.flag("featured", self.featured),
        };
        let sort = fields.sort(self.sort_by, self.sort_order);
        let page = fields.page(self.page, self.limit, default_limit);

        fields.finish()?;
        Ok(ParsedListing {
            filter: CatalogFilter::from_params(params),
            sort,
            page: page.unwrap_or_else(|| PageRequest::first(default_limit)),
            search: self.search,
            q: self.q,
        })
    }
}

impl PagedQuery {
    pub fn parse(self, default_limit: u32) -> Result<(SortSpec, PageRequest), ApiError> {
        let mut fields = QueryFields::default();
        let sort = fields.sort(self.sort_by, self.sort_order);
        let page = fields.page(self.page, self.limit, default_limit);
        fields.finish()?;
        Ok((sort, page.unwrap_or_else(|| PageRequest::first(default_limit))))
    }
}

impl LimitQuery {
    pub fn parse(self, default_limit: u32) -> Result<u32, ApiError> {
        let mut fields = QueryFields::default();
        let page = fields.page(None, self.limit, default_limit);
        fields.finish()?;
        Ok(page.map_or(default_limit, |p| p.limit()))
    }
}

/// Collects per-parameter errors while parsing a query string
#[derive(Default)]
pub(crate) struct QueryFields {
    errors: Vec<FieldError>,
}

impl QueryFields {
    fn present(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn vocabulary<T>(&mut self, field: &str, value: Option<String>) -> Option<T>
    where
        T: FromStr<Err = String>,
    {
        let raw = Self::present(value)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(message) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    fn price(&mut self, field: &str, value: Option<String>) -> Option<f64> {
        let raw = Self::present(value)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
            Ok(_) => {
                self.errors.push(FieldError::new(
                    field,
                    format!("{} must be a non-negative number", field),
                ));
                None
            }
            Err(_) => {
                self.errors
                    .push(FieldError::new(field, format!("{} must be a number", field)));
                None
            }
        }
    }

    fn flag(&mut self, field: &str, value: Option<String>) -> Option<bool> {
        let raw = Self::present(value)?;
        match raw.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                self.errors.push(FieldError::new(
                    field,
                    format!("{} must be true or false", field),
                ));
                None
            }
        }
    }

    fn integer(&mut self, field: &str, value: Option<String>) -> Option<i64> {
        let raw = Self::present(value)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                self.errors.push(FieldError::new(
                    field,
                    format!("{} must be an integer", field),
                ));
                None
            }
        }
    }

    fn sort(&mut self, sort_by: Option<String>, sort_order: Option<String>) -> SortSpec {
        let sort_by: Option<SortField> = self.vocabulary("sortBy", sort_by);
        let sort_order: Option<SortOrder> = self.vocabulary("sortOrder", sort_order);
        SortSpec::new(sort_by.unwrap_or_default(), sort_order.unwrap_or_default())
    }

    pub(crate) fn page(
        &mut self,
        page: Option<String>,
        limit: Option<String>,
        default_limit: u32,
    ) -> Option<PageRequest> {
        let before = self.errors.len();
        let page = self.integer("page", page);
        let limit = self.integer("limit", limit);
        if self.errors.len() > before {
            return None;
        }
        match PageRequest::from_query(page, limit, default_limit) {
            Ok(request) => Some(request),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::invalid_fields(
                "Invalid query parameters",
                self.errors,
            ))
        }
    }
}

// ============================================
// Response Payloads
// ============================================

/// One page of listings
#[derive(Debug, Serialize, ToSchema)]
pub struct MedicineList {
    pub medicines: Vec<MedicineListing>,
    pub pagination: PaginationMeta,
}

/// Search results with the echoed term and effective filters
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub medicines: Vec<MedicineListing>,
    pub pagination: PaginationMeta,
    pub search_query: String,
    #[schema(value_type = Object)]
    pub filters: SearchFilters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(flatten)]
    pub filter: CatalogFilter,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub limit: u32,
    pub skip: u64,
}

/// The vocabulary value a dimension endpoint was called with
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogDimension {
    MedicineType(MedicineType),
    Disease(Disease),
    Plant(Plant),
}

impl CatalogDimension {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogDimension::MedicineType(t) => t.as_str(),
            CatalogDimension::Disease(d) => d.as_str(),
            CatalogDimension::Plant(p) => p.as_str(),
        }
    }
}

/// One page of listings for a type, disease or plant
#[derive(Debug, Serialize, ToSchema)]
pub struct DimensionList {
    pub medicines: Vec<MedicineListing>,
    pub pagination: PaginationMeta,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub dimension: CatalogDimension,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMedicine {
    pub deleted_medicine: MedicineSummary,
}
