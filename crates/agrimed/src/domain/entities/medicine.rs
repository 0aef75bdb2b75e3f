//! MedicineListing - Marketplace catalog entity
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::value_objects::{
    ApplicationMethod, Availability, BusinessType, Certification, Condition, Currency, Disease,
    MedicineType, PackageUnit, Plant,
};

/// Quantity plus unit of a single package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PackageSize {
    pub value: f64,
    pub unit: PackageUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub name: String,
    /// Always stored lowercase
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: SellerLocation,
    #[serde(default)]
    pub business_type: BusinessType,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

/// MedicineListing - A plant disease medicine offered on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineListing {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: Currency,
    pub medicine_type: MedicineType,
    pub target_diseases: Vec<Disease>,
    pub target_plants: Vec<Plant>,
    pub active_ingredient: String,
    pub concentration: String,
    pub application_method: ApplicationMethod,
    pub package_size: PackageSize,
    pub condition: Condition,
    pub images: Vec<ListingImage>,
    pub seller: Option<Seller>,
    pub availability: Availability,
    pub quantity: i64,
    pub tags: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub views: i64,
    pub featured: bool,
    pub negotiable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated construction request for a listing
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: Currency,
    pub medicine_type: MedicineType,
    pub target_diseases: Vec<Disease>,
    pub target_plants: Vec<Plant>,
    pub active_ingredient: String,
    pub concentration: String,
    pub application_method: ApplicationMethod,
    pub package_size: PackageSize,
    pub condition: Condition,
    pub images: Vec<ListingImage>,
    pub seller: Option<Seller>,
    pub availability: Availability,
    pub quantity: i64,
    pub tags: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub featured: bool,
    pub negotiable: bool,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicinePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<Currency>,
    pub medicine_type: Option<MedicineType>,
    pub target_diseases: Option<Vec<Disease>>,
    pub target_plants: Option<Vec<Plant>>,
    pub active_ingredient: Option<String>,
    pub concentration: Option<String>,
    pub application_method: Option<ApplicationMethod>,
    pub package_size: Option<PackageSize>,
    pub condition: Option<Condition>,
    pub images: Option<Vec<ListingImage>>,
    pub availability: Option<Availability>,
    pub quantity: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub featured: Option<bool>,
    pub negotiable: Option<bool>,
}

/// Identity of a deleted listing
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MedicineSummary {
    pub id: Uuid,
    pub name: String,
}

impl MedicineListing {
    /// Create a listing from a validated request with a fresh id and timestamps
    pub fn new(input: NewMedicine) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            currency: input.currency,
            medicine_type: input.medicine_type,
            target_diseases: input.target_diseases,
            target_plants: input.target_plants,
            active_ingredient: input.active_ingredient,
            concentration: input.concentration,
            application_method: input.application_method,
            package_size: input.package_size,
            condition: input.condition,
            images: input.images,
            seller: input.seller,
            availability: input.availability,
            quantity: input.quantity,
            tags: input.tags,
            specifications: input.specifications,
            views: 0,
            featured: input.featured,
            negotiable: input.negotiable,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch into this listing and stamp the update time
    pub fn apply(&mut self, patch: MedicinePatch, now: DateTime<Utc>) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.currency {
            self.currency = v;
        }
        if let Some(v) = patch.medicine_type {
            self.medicine_type = v;
        }
        if let Some(v) = patch.target_diseases {
            self.target_diseases = v;
        }
        if let Some(v) = patch.target_plants {
            self.target_plants = v;
        }
        if let Some(v) = patch.active_ingredient {
            self.active_ingredient = v;
        }
        if let Some(v) = patch.concentration {
            self.concentration = v;
        }
        if let Some(v) = patch.application_method {
            self.application_method = v;
        }
        if let Some(v) = patch.package_size {
            self.package_size = v;
        }
        if let Some(v) = patch.condition {
            self.condition = v;
        }
        if let Some(v) = patch.images {
            self.images = v;
        }
        if let Some(v) = patch.availability {
            self.availability = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
        if let Some(v) = patch.specifications {
            self.specifications = v;
        }
        if let Some(v) = patch.featured {
            self.featured = v;
        }
        if let Some(v) = patch.negotiable {
            self.negotiable = v;
        }
        // Never move backwards, even if the clock does
        self.updated_at = now.max(self.updated_at);
    }

    pub fn summary(&self) -> MedicineSummary {
        MedicineSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// City of the seller, if known
    pub fn seller_city(&self) -> Option<&str> {
        self.seller
            .as_ref()
            .and_then(|s| s.location.city.as_deref())
    }
}
