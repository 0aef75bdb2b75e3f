//! AI advisor payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use agrimed::{PageRequest, PaginationMeta, PromptRecord};

use super::marketplace::QueryFields;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Page size, 1..=100
    pub limit: Option<String>,
}

impl HistoryQuery {
    pub fn parse(self, default_limit: u32) -> Result<PageRequest, ApiError> {
        let mut fields = QueryFields::default();
        let page = fields.page(self.page, self.limit, default_limit);
        fields.finish()?;
        Ok(page.unwrap_or_else(|| PageRequest::first(default_limit)))
    }
}

/// Answer from the advisor plus the outcome of storing the exchange
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorReply {
    pub answer: String,
    /// Stored record id; `None` when persistence failed
    pub record_id: Option<Uuid>,
}

impl AdvisorReply {
    pub fn saved(&self) -> bool {
        self.record_id.is_some()
    }

    /// Response data: echoed request fields, the answer, `id` and `saved`
    pub fn into_data(self, mut echoed: Map<String, Value>) -> Map<String, Value> {
        let id = self
            .record_id
            .map_or(Value::Null, |id| Value::String(id.to_string()));
        echoed.insert("id".to_string(), id);
        echoed.insert("saved".to_string(), Value::Bool(self.saved()));
        echoed
    }
}

/// One page of stored exchanges
#[derive(Debug, Serialize, ToSchema)]
pub struct PromptList {
    pub prompts: Vec<PromptRecord>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptPreview {
    pub id: Uuid,
    /// First 50 characters followed by `...`
    pub user_prompt: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPrompt {
    pub deleted_prompt: PromptPreview,
}

impl From<&PromptRecord> for PromptPreview {
    fn from(record: &PromptRecord) -> Self {
        Self {
            id: record.id,
            user_prompt: record.prompt_preview(),
        }
    }
}
