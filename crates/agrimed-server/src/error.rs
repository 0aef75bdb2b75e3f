//! HTTP error envelope
//!
//! Every failure leaves the server as `{success:false, message, details?}` with a
//! status taken from the domain error taxonomy.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use agrimed::{DomainError, FieldError};

/// Whether internal error detail may be shown to clients
static DEVELOPMENT_MODE: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

/// Enable or disable rendering of internal error detail
pub fn init_development_mode(enabled: bool) {
    let _ = DEVELOPMENT_MODE.set(enabled);
}

fn is_development() -> bool {
    DEVELOPMENT_MODE.get().copied().unwrap_or(false)
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 whose cause is only shown in development mode
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        let cause = cause.to_string();
        tracing::error!("{}", cause);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: is_development().then(|| Value::String(cause)),
        }
    }

    /// 400 listing every rejected field
    pub fn invalid_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: (!fields.is_empty())
                .then(|| serde_json::to_value(fields).unwrap_or(Value::Null)),
        }
    }

    /// Map a domain error, using `failure` as the message for server-side failures
    pub fn from_domain(err: DomainError, failure: &str) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                Self::not_found(format!("{} not found", entity_type))
            }
            DomainError::InvalidId { entity_type, .. } => Self::bad_request(format!(
                "Invalid {} ID format",
                entity_type.to_lowercase()
            )),
            DomainError::Validation { message, details } => Self::invalid_fields(message, details),
            DomainError::Unauthorized(reason) => {
                tracing::warn!("AI provider rejected credentials: {}", reason);
                Self::new(StatusCode::UNAUTHORIZED, "Invalid or missing API key")
            }
            DomainError::Timeout(after) => {
                tracing::warn!("AI provider timed out after {:?}", after);
                Self::new(
                    StatusCode::GATEWAY_TIMEOUT,
                    format!("AI service did not respond within {} seconds", after.as_secs()),
                )
            }
            DomainError::Repository(cause) | DomainError::ExternalService(cause) => {
                Self::internal(failure, cause)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, "Internal server error")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        let details = Value::String(rejection.body_text());
        Self {
            status,
            message: "Invalid JSON body".to_string(),
            details: Some(details),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid query parameters".to_string(),
            details: Some(Value::String(rejection.body_text())),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid path parameters".to_string(),
            details: Some(Value::String(rejection.body_text())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: &self.message,
            details: self.details.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_domain_error_statuses() {
        let cases = [
            (
                DomainError::not_found("Medicine", "x"),
                StatusCode::NOT_FOUND,
                "Medicine not found",
            ),
            (
                DomainError::invalid_id("Prompt", "abc"),
                StatusCode::BAD_REQUEST,
                "Invalid prompt ID format",
            ),
            (
                DomainError::validation("Search query is required"),
                StatusCode::BAD_REQUEST,
                "Search query is required",
            ),
            (
                DomainError::Unauthorized("403".into()),
                StatusCode::UNAUTHORIZED,
                "Invalid or missing API key",
            ),
            (
                DomainError::Repository("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ),
        ];
        for (err, status, message) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        let api = ApiError::from(DomainError::Timeout(Duration::from_secs(30)));
        assert_eq!(api.status(), StatusCode::GATEWAY_TIMEOUT);
        assert!(api.message().contains("30 seconds"));
    }

    #[test]
    fn test_external_failure_uses_endpoint_message() {
        let api = ApiError::from_domain(
            DomainError::ExternalService("quota".into()),
            "Failed to diagnose disease",
        );
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message(), "Failed to diagnose disease");
        // development mode is never switched on in tests
        assert!(api.details.is_none());
    }

    #[test]
    fn test_field_details_always_rendered() {
        let api = ApiError::from(DomainError::invalid_fields(
            "Validation error",
            vec![FieldError::new("price", "Price cannot be negative")],
        ));
        let details = api.details.unwrap();
        assert_eq!(details[0]["field"], "price");
        assert_eq!(details[0]["message"], "Price cannot be negative");
    }
}
