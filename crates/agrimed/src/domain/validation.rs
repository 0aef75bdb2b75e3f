//! Request Validation
//!
//! Loosely typed request drafts and their conversion into validated domain
//! inputs. Every problem is collected so callers see all rejected fields at once.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{ValidateEmail, ValidateUrl};

use crate::domain::entities::{
    Coordinates, ListingImage, MedicinePatch, NewMedicine, PackageSize, Seller, SellerLocation,
};
use crate::domain::errors::{DomainError, FieldError};
use crate::domain::value_objects::Certification;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const ACTIVE_INGREDIENT_MAX_CHARS: usize = 200;
pub const CONCENTRATION_MAX_CHARS: usize = 50;

/// Medicine listing body as submitted by a client (create or partial update)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub medicine_type: Option<String>,
    pub target_diseases: Option<Vec<String>>,
    pub target_plants: Option<Vec<String>>,
    pub active_ingredient: Option<String>,
    pub concentration: Option<String>,
    pub application_method: Option<String>,
    pub package_size: Option<PackageSizeDraft>,
    pub condition: Option<String>,
    pub images: Option<Vec<ImageDraft>>,
    pub seller: Option<SellerDraft>,
    pub availability: Option<String>,
    pub quantity: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub featured: Option<bool>,
    pub negotiable: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PackageSizeDraft {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ImageDraft {
    pub url: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<LocationDraft>,
    pub business_type: Option<String>,
    pub certifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LocationDraft {
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<CoordinatesDraft>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CoordinatesDraft {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl MedicineDraft {
    /// Validate a full construction request
    pub fn validate_new(self) -> Result<NewMedicine, DomainError> {
        let mut check = Checker::default();

        let name = check.required_text("name", self.name, "Medicine name", NAME_MAX_CHARS);
        let description = check.required_text(
            "description",
            self.description,
            "Medicine description",
            DESCRIPTION_MAX_CHARS,
        );
        let price = check.required("price", self.price, "Price is required");
        let price = price.and_then(|p| check.non_negative("price", p, "Price"));
        let currency = check.vocabulary("currency", self.currency).unwrap_or_default();
        let medicine_type = check.required_vocabulary(
            "medicineType",
            self.medicine_type,
            "Medicine type is required",
        );
        let target_diseases = check.vocabulary_list(
            "targetDiseases",
            self.target_diseases,
            "At least one target disease is required",
        );
        let target_plants = check.vocabulary_list(
            "targetPlants",
            self.target_plants,
            "At least one target plant is required",
        );
        let active_ingredient = check.required_text(
            "activeIngredient",
            self.active_ingredient,
            "Active ingredient",
            ACTIVE_INGREDIENT_MAX_CHARS,
        );
        let concentration = check.required_text(
            "concentration",
            self.concentration,
            "Concentration",
            CONCENTRATION_MAX_CHARS,
        );
        let application_method = check.required_vocabulary(
            "applicationMethod",
            self.application_method,
            "Application method is required",
        );
        let package_size = match self.package_size {
            Some(draft) => check.package_size(draft),
            None => {
                check.fail("packageSize", "Package size is required");
                None
            }
        };
        let condition = check.required_vocabulary(
            "condition",
            self.condition,
            "Product condition is required",
        );
        let images = check.images(self.images, true);
        let seller = self.seller.and_then(|draft| check.seller(draft));
        let availability = check
            .vocabulary("availability", self.availability)
            .unwrap_or_default();
        let quantity = match self.quantity {
            Some(q) => check.quantity(q),
            None => Some(1),
        };
        let specifications = check.specifications(self.specifications.unwrap_or_default());

        let (
            Some(name),
            Some(description),
            Some(price),
            Some(medicine_type),
            Some(target_diseases),
            Some(target_plants),
            Some(active_ingredient),
            Some(concentration),
            Some(application_method),
            Some(package_size),
            Some(condition),
            Some(images),
            Some(quantity),
            Some(specifications),
        ) = (
            name,
            description,
            price,
            medicine_type,
            target_diseases,
            target_plants,
            active_ingredient,
            concentration,
            application_method,
            package_size,
            condition,
            images,
            quantity,
            specifications,
        )
        else {
            return Err(check.into_error());
        };
        if !check.errors.is_empty() {
            return Err(check.into_error());
        }

        Ok(NewMedicine {
            name,
            description,
            price,
            currency,
            medicine_type,
            target_diseases,
            target_plants,
            active_ingredient,
            concentration,
            application_method,
            package_size,
            condition,
            images,
            seller,
            availability,
            quantity,
            tags: normalize_tags(self.tags.unwrap_or_default()),
            specifications,
            featured: self.featured.unwrap_or(false),
            negotiable: self.negotiable.unwrap_or(true),
        })
    }

    /// Validate a partial update. Only supplied fields are checked and carried.
    pub fn validate_patch(self) -> Result<MedicinePatch, DomainError> {
        let mut check = Checker::default();

        if self.seller.is_some() {
            check.fail("seller", "Seller details cannot be changed after creation");
        }

        let patch = MedicinePatch {
            name: self
                .name
                .and_then(|v| check.text("name", v, "Medicine name", NAME_MAX_CHARS)),
            description: self.description.and_then(|v| {
                check.text(
                    "description",
                    v,
                    "Medicine description",
                    DESCRIPTION_MAX_CHARS,
                )
            }),
            price: self
                .price
                .and_then(|p| check.non_negative("price", p, "Price")),
            currency: check.vocabulary("currency", self.currency),
            medicine_type: check.vocabulary("medicineType", self.medicine_type),
            target_diseases: self.target_diseases.and_then(|values| {
                check.vocabulary_list(
                    "targetDiseases",
                    Some(values),
                    "At least one target disease is required",
                )
            }),
            target_plants: self.target_plants.and_then(|values| {
                check.vocabulary_list(
                    "targetPlants",
                    Some(values),
                    "At least one target plant is required",
                )
            }),
            active_ingredient: self.active_ingredient.and_then(|v| {
                check.text(
                    "activeIngredient",
                    v,
                    "Active ingredient",
                    ACTIVE_INGREDIENT_MAX_CHARS,
                )
            }),
            concentration: self.concentration.and_then(|v| {
                check.text(
                    "concentration",
                    v,
                    "Concentration",
                    CONCENTRATION_MAX_CHARS,
                )
            }),
            application_method: check.vocabulary("applicationMethod", self.application_method),
            package_size: self.package_size.and_then(|d| check.package_size(d)),
            condition: check.vocabulary("condition", self.condition),
            images: match self.images {
                Some(images) => check.images(Some(images), true),
                None => None,
            },
            availability: check.vocabulary("availability", self.availability),
            quantity: self.quantity.and_then(|q| check.quantity(q)),
            tags: self.tags.map(normalize_tags),
            specifications: self
                .specifications
                .and_then(|specs| check.specifications(specs)),
            featured: self.featured,
            negotiable: self.negotiable,
        };

        if check.errors.is_empty() {
            Ok(patch)
        } else {
            Err(check.into_error())
        }
    }
}

/// Tags are trimmed, lowercased and blank ones dropped
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Accumulates field errors while converting draft values
#[derive(Debug, Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn into_error(self) -> DomainError {
        DomainError::invalid_fields("Validation error", self.errors)
    }

    fn required<T>(&mut self, field: &str, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.fail(field, message);
        }
        value
    }

    /// Trimmed, non-empty text of bounded length
    fn text(&mut self, field: &str, value: String, label: &str, max: usize) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.fail(field, format!("{} is required", label));
            return None;
        }
        if trimmed.chars().count() > max {
            self.fail(
                field,
                format!("{} cannot exceed {} characters", label, max),
            );
            return None;
        }
        Some(trimmed.to_string())
    }

    fn required_text(
        &mut self,
        field: &str,
        value: Option<String>,
        label: &str,
        max: usize,
    ) -> Option<String> {
        match value {
            Some(v) => self.text(field, v, label, max),
            None => {
                self.fail(field, format!("{} is required", label));
                None
            }
        }
    }

    fn non_negative(&mut self, field: &str, value: f64, label: &str) -> Option<f64> {
        if !value.is_finite() {
            self.fail(field, format!("{} must be a number", label));
            None
        } else if value < 0.0 {
            self.fail(field, format!("{} cannot be negative", label));
            None
        } else {
            Some(value)
        }
    }

    fn quantity(&mut self, value: i64) -> Option<i64> {
        if value < 0 {
            self.fail("quantity", "Quantity cannot be negative");
            None
        } else {
            Some(value)
        }
    }

    fn vocabulary<T>(&mut self, field: &str, value: Option<String>) -> Option<T>
    where
        T: FromStr<Err = String>,
    {
        match value.map(|v| v.parse::<T>()) {
            Some(Ok(parsed)) => Some(parsed),
            Some(Err(message)) => {
                self.fail(field, message);
                None
            }
            None => None,
        }
    }

    fn required_vocabulary<T>(
        &mut self,
        field: &str,
        value: Option<String>,
        missing: &str,
    ) -> Option<T>
    where
        T: FromStr<Err = String>,
    {
        if value.is_none() {
            self.fail(field, missing);
            return None;
        }
        self.vocabulary(field, value)
    }

    /// Non-empty list of vocabulary members, duplicates removed
    fn vocabulary_list<T>(
        &mut self,
        field: &str,
        values: Option<Vec<String>>,
        empty: &str,
    ) -> Option<Vec<T>>
    where
        T: FromStr<Err = String> + PartialEq,
    {
        let values = values.unwrap_or_default();
        if values.is_empty() {
            self.fail(field, empty);
            return None;
        }

        let mut parsed = Vec::with_capacity(values.len());
        let mut ok = true;
        for (i, raw) in values.into_iter().enumerate() {
            match raw.parse::<T>() {
                Ok(v) if !parsed.contains(&v) => parsed.push(v),
                Ok(_) => {}
                Err(message) => {
                    self.fail(&format!("{}.{}", field, i), message);
                    ok = false;
                }
            }
        }
        ok.then_some(parsed)
    }

    fn package_size(&mut self, draft: PackageSizeDraft) -> Option<PackageSize> {
        let value = match draft.value {
            Some(v) => self.non_negative("packageSize.value", v, "Package size"),
            None => {
                self.fail("packageSize.value", "Package size value is required");
                None
            }
        };
        let unit = self.required_vocabulary(
            "packageSize.unit",
            draft.unit,
            "Package size unit is required",
        );
        Some(PackageSize {
            value: value?,
            unit: unit?,
        })
    }

    fn images(&mut self, images: Option<Vec<ImageDraft>>, required: bool) -> Option<Vec<ListingImage>> {
        let images = images.unwrap_or_default();
        if images.is_empty() {
            if required {
                self.fail("images", "At least one image is required");
            }
            return None;
        }

        let mut out = Vec::with_capacity(images.len());
        for (i, image) in images.into_iter().enumerate() {
            let field = format!("images.{}.url", i);
            match image.url.map(|u| u.trim().to_string()) {
                Some(url) if url.validate_url() => out.push(ListingImage {
                    url,
                    alt: image.alt.unwrap_or_default(),
                }),
                Some(_) => self.fail(&field, "Image URL must be a valid URL"),
                None => self.fail(&field, "Image URL is required"),
            }
        }
        Some(out)
    }

    fn seller(&mut self, draft: SellerDraft) -> Option<Seller> {
        let name = self.required_text("seller.name", draft.name, "Seller name", NAME_MAX_CHARS);
        let email = match draft.email.map(|e| e.trim().to_lowercase()) {
            Some(email) if email.validate_email() => Some(email),
            Some(_) => {
                self.fail("seller.email", "Please enter a valid email address");
                None
            }
            None => {
                self.fail("seller.email", "Seller email is required");
                None
            }
        };
        let business_type = self
            .vocabulary("seller.businessType", draft.business_type)
            .unwrap_or_default();

        let mut certifications = Vec::new();
        for (i, raw) in draft.certifications.unwrap_or_default().into_iter().enumerate() {
            match raw.parse::<Certification>() {
                Ok(c) if !certifications.contains(&c) => certifications.push(c),
                Ok(_) => {}
                Err(message) => self.fail(&format!("seller.certifications.{}", i), message),
            }
        }

        let location = match draft.location {
            Some(loc) => SellerLocation {
                city: non_blank(loc.city),
                country: non_blank(loc.country),
                coordinates: loc.coordinates.and_then(|c| self.coordinates(c)),
            },
            None => SellerLocation::default(),
        };

        Some(Seller {
            name: name?,
            email: email?,
            phone: non_blank(draft.phone),
            location,
            business_type,
            certifications,
        })
    }

    fn coordinates(&mut self, draft: CoordinatesDraft) -> Option<Coordinates> {
        let latitude = match draft.latitude {
            Some(lat) if (-90.0..=90.0).contains(&lat) => Some(lat),
            Some(_) => {
                self.fail(
                    "seller.location.coordinates.latitude",
                    "Latitude must be between -90 and 90",
                );
                None
            }
            None => {
                self.fail(
                    "seller.location.coordinates.latitude",
                    "Latitude is required when coordinates are given",
                );
                None
            }
        };
        let longitude = match draft.longitude {
            Some(lon) if (-180.0..=180.0).contains(&lon) => Some(lon),
            Some(_) => {
                self.fail(
                    "seller.location.coordinates.longitude",
                    "Longitude must be between -180 and 180",
                );
                None
            }
            None => {
                self.fail(
                    "seller.location.coordinates.longitude",
                    "Longitude is required when coordinates are given",
                );
                None
            }
        };
        Some(Coordinates {
            latitude: latitude?,
            longitude: longitude?,
        })
    }

    fn specifications(
        &mut self,
        specs: BTreeMap<String, String>,
    ) -> Option<BTreeMap<String, String>> {
        if specs.keys().any(|k| k.trim().is_empty()) {
            self.fail("specifications", "Specification names cannot be empty");
            return None;
        }
        Some(specs)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
