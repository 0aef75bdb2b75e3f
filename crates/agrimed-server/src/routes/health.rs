//! Health and service index

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use agrimed::{ApplicationMethod, Disease, MedicineType, Plant};

use crate::AppState;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is running")
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API is running successfully",
        "timestamp": Utc::now(),
    }))
}

/// Endpoint index with the supported vocabularies
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Service index")
    ),
    tag = "Health"
)]
pub async fn api_index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Welcome to the Plant Disease Medicine Marketplace API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "A marketplace for plant disease medicines with an AI plant health advisor",
        "storage": state.store,
        "aiAdvisor": state.advisor.is_enabled(),
        "endpoints": {
            "health": "GET /api/health",
            "docs": "GET /swagger-ui",
            "marketplace": [
                "GET /api/marketplace",
                "POST /api/marketplace",
                "GET /api/marketplace/featured",
                "GET /api/marketplace/search?q=",
                "GET /api/marketplace/type/:medicineType",
                "GET /api/marketplace/disease/:disease",
                "GET /api/marketplace/plant/:plant",
                "GET /api/marketplace/:id",
                "PUT /api/marketplace/:id",
                "DELETE /api/marketplace/:id",
            ],
            "ai": [
                "POST /api/ai/prompt",
                "POST /api/ai/diagnose",
                "POST /api/ai/treatment",
                "POST /api/ai/prevention",
                "POST /api/ai/disease-info",
                "POST /api/ai/ai-treatment",
                "GET /api/ai/prompts",
                "GET /api/ai/prompts/:id",
                "DELETE /api/ai/prompts/:id",
            ],
        },
        "supportedDiseases": Disease::labels(),
        "supportedPlants": Plant::labels(),
        "medicineTypes": MedicineType::labels(),
        "applicationMethods": ApplicationMethod::labels(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(api_index))
        .route("/api/health", get(health_check))
}
