//! Filter Builder
//!
//! Translates independently supplied, already vocabulary-checked parameters
//! into one structured predicate over listings.

use serde::Serialize;

use super::contains_ignore_case;
use crate::domain::entities::MedicineListing;
use crate::domain::value_objects::{
    ApplicationMethod, Availability, Condition, Disease, MedicineType, Plant,
};

/// Optional filter parameters as received from a caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    /// Defaults to `Available` when absent
    pub availability: Option<Availability>,
    pub medicine_type: Option<MedicineType>,
    pub application_method: Option<ApplicationMethod>,
    pub condition: Option<Condition>,
    pub target_disease: Option<Disease>,
    pub target_plant: Option<Plant>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Substring of the seller's city
    pub location: Option<String>,
    /// Substring of the active ingredient
    pub active_ingredient: Option<String>,
    /// Only applied when explicitly supplied
    pub featured: Option<bool>,
}

/// Conjunction of structured constraints. `None` means "any".
///
/// An inverted price range (`min_price > max_price`) is kept as-is and simply
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicine_type: Option<MedicineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_method: Option<ApplicationMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_disease: Option<Disease>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_plant: Option<Plant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_ingredient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl CatalogFilter {
    /// Build the predicate, applying the availability default and dropping blank
    /// substring filters
    pub fn from_params(params: FilterParams) -> Self {
        Self {
            availability: Some(params.availability.unwrap_or_default()),
            medicine_type: params.medicine_type,
            application_method: params.application_method,
            condition: params.condition,
            target_disease: params.target_disease,
            target_plant: params.target_plant,
            min_price: params.min_price,
            max_price: params.max_price,
            location: non_blank(params.location),
            active_ingredient: non_blank(params.active_ingredient),
            featured: params.featured,
        }
    }

    /// Every available listing
    pub fn available() -> Self {
        Self::from_params(FilterParams::default())
    }

    pub fn with_medicine_type(mut self, medicine_type: MedicineType) -> Self {
        self.medicine_type = Some(medicine_type);
        self
    }

    pub fn with_disease(mut self, disease: Disease) -> Self {
        self.target_disease = Some(disease);
        self
    }

    pub fn with_plant(mut self, plant: Plant) -> Self {
        self.target_plant = Some(plant);
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured = Some(true);
        self
    }

    /// Evaluate the predicate in-process
    pub fn matches(&self, listing: &MedicineListing) -> bool {
        if let Some(availability) = self.availability {
            if listing.availability != availability {
                return false;
            }
        }
        if let Some(medicine_type) = self.medicine_type {
            if listing.medicine_type != medicine_type {
                return false;
            }
        }
        if let Some(method) = self.application_method {
            if listing.application_method != method {
                return false;
            }
        }
        if let Some(condition) = self.condition {
            if listing.condition != condition {
                return false;
            }
        }
        if let Some(disease) = self.target_disease {
            if !listing.target_diseases.contains(&disease) {
                return false;
            }
        }
        if let Some(plant) = self.target_plant {
            if !listing.target_plants.contains(&plant) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        if let Some(location) = &self.location {
            match listing.seller_city() {
                Some(city) if contains_ignore_case(city, location) => {}
                _ => return false,
            }
        }
        if let Some(ingredient) = &self.active_ingredient {
            if !contains_ignore_case(&listing.active_ingredient, ingredient) {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if listing.featured != featured {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::copper_fungicide;
    use super::*;

    #[test]
    fn test_availability_defaults_to_available() {
        let filter = CatalogFilter::from_params(FilterParams::default());
        assert_eq!(filter.availability, Some(Availability::Available));

        let mut listing = copper_fungicide();
        assert!(filter.matches(&listing));
        listing.availability = Availability::Sold;
        assert!(!filter.matches(&listing));
    }

    #[test]
    fn test_explicit_availability_overrides_default() {
        let filter = CatalogFilter::from_params(FilterParams {
            availability: Some(Availability::Sold),
            ..Default::default()
        });
        let mut listing = copper_fungicide();
        assert!(!filter.matches(&listing));
        listing.availability = Availability::Sold;
        assert!(filter.matches(&listing));
    }

    #[test]
    fn test_membership_filters() {
        let listing = copper_fungicide();
        assert!(CatalogFilter::available()
            .with_disease(Disease::LateBlight)
            .matches(&listing));
        assert!(!CatalogFilter::available()
            .with_disease(Disease::Rust)
            .matches(&listing));
        assert!(CatalogFilter::available()
            .with_plant(Plant::Potato)
            .matches(&listing));
        assert!(!CatalogFilter::available()
            .with_plant(Plant::Rice)
            .matches(&listing));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let listing = copper_fungicide();
        let filter = CatalogFilter::from_params(FilterParams {
            min_price: Some(24.99),
            max_price: Some(24.99),
            ..Default::default()
        });
        assert!(filter.matches(&listing));
    }

    #[test]
    fn test_inverted_price_range_matches_nothing() {
        let listing = copper_fungicide();
        let filter = CatalogFilter::from_params(FilterParams {
            min_price: Some(100.0),
            max_price: Some(50.0),
            ..Default::default()
        });
        assert_eq!(filter.min_price, Some(100.0));
        assert!(!filter.matches(&listing));
    }

    #[test]
    fn test_location_is_case_insensitive_substring_of_city() {
        let mut listing = copper_fungicide();
        let filter = CatalogFilter::from_params(FilterParams {
            location: Some("  des moi ".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.location.as_deref(), Some("des moi"));
        assert!(filter.matches(&listing));

        listing.seller = None;
        assert!(!filter.matches(&listing));
    }

    #[test]
    fn test_blank_location_is_ignored() {
        let filter = CatalogFilter::from_params(FilterParams {
            location: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.location, None);
    }

    #[test]
    fn test_featured_only_applied_when_supplied() {
        let mut listing = copper_fungicide();
        assert!(CatalogFilter::available().matches(&listing));
        assert!(!CatalogFilter::available().featured_only().matches(&listing));
        listing.featured = true;
        assert!(CatalogFilter::available().featured_only().matches(&listing));

        let not_featured = CatalogFilter::from_params(FilterParams {
            featured: Some(false),
            ..Default::default()
        });
        assert!(!not_featured.matches(&listing));
    }

    #[test]
    fn test_exact_enum_filters() {
        let listing = copper_fungicide();
        let matching = CatalogFilter::from_params(FilterParams {
            medicine_type: Some(MedicineType::CopperBased),
            application_method: Some(ApplicationMethod::FoliarSpray),
            condition: Some(Condition::New),
            ..Default::default()
        });
        assert!(matching.matches(&listing));

        let other_method = CatalogFilter::from_params(FilterParams {
            application_method: Some(ApplicationMethod::SoilDrench),
            ..Default::default()
        });
        assert!(!other_method.matches(&listing));
    }

    #[test]
    fn test_serialized_filter_omits_absent_fields() {
        let filter = CatalogFilter::available().with_plant(Plant::Tomato);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "availability": "Available", "targetPlant": "Tomato" })
        );
    }
}
