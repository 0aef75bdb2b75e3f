//! Gemini text generation advisor
//!
//! Calls the `generateContent` REST endpoint with a single user turn.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use agrimed::{DomainError, PlantAdvisor};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Advisor backed by a Gemini model
#[derive(Clone)]
pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiAdvisor {
    /// Creates a new advisor using the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Overrides the Gemini model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl PlantAdvisor for GeminiAdvisor {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        // Errors are stripped of the URL, which carries the key
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                DomainError::ExternalService(format!("Request failed: {}", err.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body));
        }

        let payload: Value = response.json().await.map_err(|err| {
            DomainError::ExternalService(format!("Parse error: {}", err.without_url()))
        })?;

        extract_answer(&payload)
            .ok_or_else(|| DomainError::ExternalService("Gemini returned no answer".to_string()))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

// ============================================
// Helper Functions
// ============================================

fn extract_answer(root: &Value) -> Option<String> {
    let candidates = root.get("candidates")?.as_array()?;

    let mut collected = Vec::new();
    for candidate in candidates {
        let Some(parts) = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
        else {
            continue;
        };
        for part in parts {
            if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    collected.push(trimmed.to_string());
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n\n"))
    }
}

fn map_http_error(status: StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    // Gemini reports a bad key as 400 API_KEY_INVALID
    let bad_key = message.contains("API key") || body.contains("API_KEY_INVALID");
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || bad_key {
        return DomainError::Unauthorized(message);
    }

    DomainError::ExternalService(format!("Gemini API error ({}): {}", status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_answer_joins_parts() {
        let payload = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "  Early blight.  " }, { "text": "" }, { "text": "Use copper." }]
                }
            }]
        });
        assert_eq!(
            extract_answer(&payload).as_deref(),
            Some("Early blight.\n\nUse copper.")
        );
    }

    #[test]
    fn test_extract_answer_empty() {
        assert_eq!(extract_answer(&json!({ "candidates": [] })), None);
        assert_eq!(extract_answer(&json!({ "promptFeedback": {} })), None);
    }

    #[test]
    fn test_bad_key_is_unauthorized() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            map_http_error(StatusCode::BAD_REQUEST, body),
            DomainError::Unauthorized(_)
        ));
        assert!(matches!(
            map_http_error(StatusCode::FORBIDDEN, "denied"),
            DomainError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_other_failures_are_external() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        match map_http_error(StatusCode::TOO_MANY_REQUESTS, body) {
            DomainError::ExternalService(message) => {
                assert_eq!(message, "Gemini API error (429): Resource has been exhausted")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_model_override() {
        let advisor = GeminiAdvisor::new("key").with_model("gemini-2.0-flash");
        assert_eq!(advisor.model_id(), "gemini-2.0-flash");
        assert_eq!(advisor.provider_name(), "gemini");
    }
}
