//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use agrimed::domain::{
    CoordinatesDraft, ImageDraft, LocationDraft, PackageSizeDraft, SellerDraft,
};
use agrimed::{
    AiTreatmentRequest, ApplicationMethod, Availability, BusinessType, Certification, Condition,
    Coordinates, Currency, DiagnosisRequest, Disease, DiseaseInfoRequest, FieldError,
    GeneralRequest, ListingImage, MedicineDraft, MedicineListing, MedicineSummary, MedicineType,
    PackageSize, PackageUnit, PaginationMeta, Plant, PreventionRequest, PromptRecord, PromptType,
    Seller, SellerLocation, TreatmentRequest,
};

use crate::models::{
    DeletedMedicine, DeletedPrompt, DimensionList, MedicineList, PromptList, PromptPreview,
    SearchResults,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        super::health::health_check,
        super::health::api_index,
        // Marketplace endpoints
        super::marketplace::list_medicines,
        super::marketplace::create_medicine,
        super::marketplace::featured_medicines,
        super::marketplace::search_medicines,
        super::marketplace::medicines_by_type,
        super::marketplace::medicines_by_disease,
        super::marketplace::medicines_by_plant,
        super::marketplace::get_medicine,
        super::marketplace::update_medicine,
        super::marketplace::delete_medicine,
        // AI endpoints
        super::ai::general_prompt,
        super::ai::diagnose,
        super::ai::treatment,
        super::ai::prevention,
        super::ai::disease_info,
        super::ai::ai_treatment,
        super::ai::list_prompts,
        super::ai::get_prompt,
        super::ai::delete_prompt,
    ),
    info(
        title = "Agrimed API",
        version = "0.1.0",
        description = "Plant disease medicine marketplace with an AI plant health advisor.\n\nEvery response is wrapped in `{success, message, data?, details?}`; the schemas below describe `data`.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check and service index"),
        (name = "Marketplace", description = "Marketplace - Plant disease medicine listings"),
        (name = "AI", description = "AI - Plant health advisor and prompt history"),
    ),
    components(
        schemas(
            // Vocabularies
            MedicineType,
            ApplicationMethod,
            PackageUnit,
            Condition,
            Currency,
            Availability,
            BusinessType,
            Certification,
            Disease,
            Plant,
            PromptType,
            // Listings
            MedicineListing,
            PackageSize,
            ListingImage,
            Seller,
            SellerLocation,
            Coordinates,
            MedicineSummary,
            MedicineDraft,
            PackageSizeDraft,
            ImageDraft,
            SellerDraft,
            LocationDraft,
            CoordinatesDraft,
            MedicineList,
            SearchResults,
            DimensionList,
            DeletedMedicine,
            PaginationMeta,
            FieldError,
            // AI
            GeneralRequest,
            DiagnosisRequest,
            TreatmentRequest,
            PreventionRequest,
            DiseaseInfoRequest,
            AiTreatmentRequest,
            PromptRecord,
            PromptList,
            PromptPreview,
            DeletedPrompt,
        )
    ),
)]
pub struct ApiDoc;
