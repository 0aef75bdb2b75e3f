//! Agrimed API Routes
//!
//! - /api/health - Liveness
//! - /api - Service index and vocabularies
//! - /api/marketplace - Medicine listings (CRUD, list, search, featured, by dimension)
//! - /api/ai - Plant health advisor and prompt history

pub mod ai;
pub mod health;
pub mod marketplace;
pub mod swagger;

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use crate::AppState;

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Assemble every route with the shared middleware stack
pub fn build_router(state: AppState) -> Router {
    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(health::router())
        .merge(marketplace::router())
        .merge(ai::router())
        .fallback(route_not_found)
        .layer(middleware::map_response(unmatched_method))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> Response {
    let body = json!({
        "success": false,
        "message": "Route not found",
        "path": uri.to_string(),
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// A known path with an unsupported method is answered like an unknown route
async fn unmatched_method(uri: OriginalUri, response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return route_not_found(uri).await;
    }
    response
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    ApiError::internal("Internal server error", format!("Handler panicked: {}", detail))
        .into_response()
}
