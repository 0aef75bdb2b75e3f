//! Shared fixtures for service and route tests

use async_trait::async_trait;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use agrimed::{
    DomainError, MedicineDraft, MedicineRepository, PageRequest, PlantAdvisor, PromptRecord,
    PromptRepository,
};

use crate::adapters::{InMemoryMedicineRepository, InMemoryPromptRepository};
use crate::application::{AdvisorService, CatalogService};
use crate::{routes, AppState};

/// Request body for a valid "Copper Fungicide Pro" listing
pub fn copper_json() -> Value {
    json!({
        "name": "Copper Fungicide Pro",
        "description": "Broad spectrum copper fungicide for blight control",
        "price": 24.99,
        "medicineType": "Copper-based",
        "targetDiseases": ["Early Blight", "Late Blight"],
        "targetPlants": ["Tomato", "Potato"],
        "activeIngredient": "Copper hydroxide",
        "concentration": "50% WP",
        "applicationMethod": "Foliar Spray",
        "packageSize": { "value": 500, "unit": "g" },
        "condition": "New",
        "images": [{ "url": "https://example.com/copper.jpg", "alt": "Copper Fungicide Pro" }],
        "seller": {
            "name": "AgriCare Solutions",
            "email": "Sales@AgriCare.com",
            "location": { "city": "Des Moines", "country": "USA" }
        },
        "tags": ["Copper", " fungicide "]
    })
}

pub fn copper_draft() -> MedicineDraft {
    serde_json::from_value(copper_json()).unwrap()
}

enum Script {
    Answer(String),
    Fail(String),
    Sleep(Duration),
}

/// Advisor double that records every prompt it receives
pub struct ScriptedAdvisor {
    script: Script,
    seen: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAdvisor {
    fn with(script: Script) -> Self {
        Self {
            script,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answering(answer: &str) -> Self {
        Self::with(Script::Answer(answer.to_string()))
    }

    pub fn failing(reason: &str) -> Self {
        Self::with(Script::Fail(reason.to_string()))
    }

    pub fn slow(delay: Duration) -> Self {
        Self::with(Script::Sleep(delay))
    }

    pub fn seen_prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.seen.clone()
    }
}

#[async_trait]
impl PlantAdvisor for ScriptedAdvisor {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.seen.lock().await.push(prompt.to_string());
        match &self.script {
            Script::Answer(answer) => Ok(answer.clone()),
            Script::Fail(reason) => Err(DomainError::ExternalService(reason.clone())),
            Script::Sleep(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("too late".to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-1"
    }
}

/// Prompt store that is always down
pub struct FailingPromptRepository;

#[async_trait]
impl PromptRepository for FailingPromptRepository {
    async fn save(&self, _record: &PromptRecord) -> Result<PromptRecord, DomainError> {
        Err(DomainError::Repository("connection refused".into()))
    }

    async fn find_page(&self, _page: &PageRequest) -> Result<Vec<PromptRecord>, DomainError> {
        Err(DomainError::Repository("connection refused".into()))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Err(DomainError::Repository("connection refused".into()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<PromptRecord>, DomainError> {
        Err(DomainError::Repository("connection refused".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<Option<PromptRecord>, DomainError> {
        Err(DomainError::Repository("connection refused".into()))
    }
}

/// Full router over empty in-memory stores
pub fn test_app(advisor: Option<ScriptedAdvisor>) -> Router {
    let advisor = advisor.map(|a| Arc::new(a) as Arc<dyn PlantAdvisor>);
    let medicines: Arc<dyn MedicineRepository> = Arc::new(InMemoryMedicineRepository::new());
    let prompts: Arc<dyn PromptRepository> = Arc::new(InMemoryPromptRepository::new());
    let state = AppState {
        catalog: Arc::new(CatalogService::new(medicines)),
        advisor: Arc::new(AdvisorService::new(advisor, prompts, Duration::from_secs(5))),
        store: "memory",
    };
    routes::build_router(state)
}
