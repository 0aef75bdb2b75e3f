//! PromptRecord - Persisted AI advisor exchange
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::value_objects::PromptType;

/// PromptRecord - One question/answer exchange with the AI advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub id: Uuid,
    pub user_prompt: String,
    pub ai_response: String,
    pub prompt_type: PromptType,
    pub plant_type: Option<String>,
    pub disease_type: Option<String>,
    pub region: Option<String>,
    pub severity: Option<String>,
    /// Detection model confidence, in percent
    pub confidence: Option<f64>,
    pub organic_only: bool,
    pub created_at: DateTime<Utc>,
}

/// Exchange to persist, before the store assigns identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPromptRecord {
    pub user_prompt: String,
    pub ai_response: String,
    pub prompt_type: PromptType,
    pub plant_type: Option<String>,
    pub disease_type: Option<String>,
    pub region: Option<String>,
    pub severity: Option<String>,
    pub confidence: Option<f64>,
    pub organic_only: bool,
}

impl PromptRecord {
    pub fn new(input: NewPromptRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_prompt: input.user_prompt,
            ai_response: input.ai_response,
            prompt_type: input.prompt_type,
            plant_type: input.plant_type,
            disease_type: input.disease_type,
            region: input.region,
            severity: input.severity,
            confidence: input.confidence,
            organic_only: input.organic_only,
            created_at: Utc::now(),
        }
    }

    /// Short form of the user prompt used in deletion summaries
    pub fn prompt_preview(&self) -> String {
        let head: String = self.user_prompt.chars().take(50).collect();
        format!("{}...", head)
    }
}
