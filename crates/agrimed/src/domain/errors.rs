//! Domain Errors
//!
//! Error types for domain operations.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Dotted path of the offending field (e.g. `seller.email`)
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid {entity_type} id: {id}")]
    InvalidId { entity_type: String, id: String },

    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("External service timed out after {0:?}")]
    Timeout(Duration),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid_id<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::InvalidId {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    /// Validation failure without per-field details
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn invalid_fields(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
}

/// Parse a textual id into a UUID, reporting `InvalidId` for malformed input
pub fn parse_id<T: AsRef<str>>(entity_type: T, raw: &str) -> Result<uuid::Uuid, DomainError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| DomainError::invalid_id(entity_type, raw))
}
