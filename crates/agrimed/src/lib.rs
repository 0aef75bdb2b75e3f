//! Agrimed Domain Library
//!
//! Core domain types and interfaces for the plant disease medicine marketplace
//! and its AI plant-health advisor.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (MedicineListing, PromptRecord)
//!   - `value_objects/`: Closed vocabularies (MedicineType, Disease, Plant, ...)
//!   - `query/`: Catalog filter, text search, sorting and pagination
//!   - `validation`: Request drafts and per-field validation
//!   - `consultation`: AI consultation kinds and prompt templates
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use agrimed::domain::{CatalogQuery, FilterParams, PageRequest};
//! use agrimed::ports::MedicineRepository;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AiTreatmentRequest, ApplicationMethod, Availability, BusinessType, CatalogFilter,
    CatalogQuery, Certification, Condition, Consultation, Coordinates, Currency,
    DiagnosisRequest, Disease, DiseaseInfoRequest, DomainError, FieldError, FilterParams,
    GeneralRequest, ListingImage, MedicineDraft, MedicineListing, MedicinePatch,
    MedicineSummary, MedicineType, NewMedicine, NewPromptRecord, PackageSize, PackageUnit, Page,
    PageRequest, PaginationMeta, Plant, PreventionRequest, PromptRecord, PromptType, Seller,
    SellerLocation, SortField, SortOrder, SortSpec, TextSearch, TreatmentRequest,
};
pub use ports::{MedicineRepository, PlantAdvisor, PromptRepository};
