//! AI Routes - Plant health advisor and prompt history
//!
//! Consultation handlers share one flow: validate, ask the advisor, store the
//! exchange (best effort) and echo the request alongside the answer.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde_json::{Map, Value};

use agrimed::domain::{parse_id, HISTORY_PAGE_LIMIT};
use agrimed::{
    AiTreatmentRequest, Consultation, DiagnosisRequest, DiseaseInfoRequest, GeneralRequest,
    PreventionRequest, PromptRecord, TreatmentRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{ApiResponse, DeletedPrompt, HistoryQuery, PromptList, PromptPreview};
use crate::AppState;

const PROMPT: &str = "Prompt";

async fn consult(
    state: &AppState,
    consultation: Consultation,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    let reply = state
        .advisor
        .consult(&consultation)
        .await
        .map_err(|e| ApiError::from_domain(e, consultation.failure_message()))?;

    let echoed = consultation.response_data(&reply.answer);
    Ok(ApiResponse::ok(
        consultation.success_message(),
        reply.into_data(echoed),
    ))
}

/// Answer a free-text plant health question
#[utoipa::path(
    post,
    path = "/api/ai/prompt",
    request_body = GeneralRequest,
    responses(
        (status = 200, description = "Content generated successfully"),
        (status = 400, description = "Prompt is required"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 504, description = "AI service timed out")
    ),
    tag = "AI"
)]
pub async fn general_prompt(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GeneralRequest>,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    consult(&state, Consultation::General(request)).await
}

/// Diagnose a disease from observed symptoms
#[utoipa::path(
    post,
    path = "/api/ai/diagnose",
    request_body = DiagnosisRequest,
    responses(
        (status = 200, description = "Disease diagnosis completed"),
        (status = 400, description = "Disease symptoms are required"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 504, description = "AI service timed out")
    ),
    tag = "AI"
)]
pub async fn diagnose(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DiagnosisRequest>,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    consult(&state, Consultation::Diagnosis(request)).await
}

/// Treatment recommendations for a known disease
#[utoipa::path(
    post,
    path = "/api/ai/treatment",
    request_body = TreatmentRequest,
    responses(
        (status = 200, description = "Treatment recommendations generated"),
        (status = 400, description = "Disease name is required"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 504, description = "AI service timed out")
    ),
    tag = "AI"
)]
pub async fn treatment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TreatmentRequest>,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    consult(&state, Consultation::Treatment(request)).await
}

/// Prevention strategies for a plant
#[utoipa::path(
    post,
    path = "/api/ai/prevention",
    request_body = PreventionRequest,
    responses(
        (status = 200, description = "Prevention strategies generated"),
        (status = 400, description = "Plant type is required"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 504, description = "AI service timed out")
    ),
    tag = "AI"
)]
pub async fn prevention(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PreventionRequest>,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    consult(&state, Consultation::Prevention(request)).await
}

/// Explain a disease reported by an image classifier
#[utoipa::path(
    post,
    path = "/api/ai/disease-info",
    request_body = DiseaseInfoRequest,
    responses(
        (status = 200, description = "Disease information generated successfully"),
        (status = 400, description = "Disease name is required"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 504, description = "AI service timed out")
    ),
    tag = "AI"
)]
pub async fn disease_info(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DiseaseInfoRequest>,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    consult(&state, Consultation::DiseaseInfo(request)).await
}

/// Treatment plan for a classifier detection
#[utoipa::path(
    post,
    path = "/api/ai/ai-treatment",
    request_body = AiTreatmentRequest,
    responses(
        (status = 200, description = "AI-based treatment recommendations generated"),
        (status = 400, description = "Disease name is required"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 504, description = "AI service timed out")
    ),
    tag = "AI"
)]
pub async fn ai_treatment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AiTreatmentRequest>,
) -> ApiResult<ApiResponse<Map<String, Value>>> {
    consult(&state, Consultation::AiTreatment(request)).await
}

/// Stored exchanges, newest first
#[utoipa::path(
    get,
    path = "/api/ai/prompts",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Prompts retrieved successfully", body = PromptList),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Failed to fetch prompts")
    ),
    tag = "AI"
)]
pub async fn list_prompts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> ApiResult<ApiResponse<PromptList>> {
    let page = query.parse(HISTORY_PAGE_LIMIT)?;
    let results = state
        .advisor
        .history(&page)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch prompts"))?;

    Ok(ApiResponse::ok(
        "Prompts retrieved successfully",
        PromptList {
            prompts: results.items,
            pagination: results.pagination,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/ai/prompts/{id}",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt retrieved successfully", body = PromptRecord),
        (status = 400, description = "Invalid prompt ID format"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "AI"
)]
pub async fn get_prompt(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
) -> ApiResult<ApiResponse<PromptRecord>> {
    let id = parse_id(PROMPT, &raw)?;
    let record = state
        .advisor
        .get_prompt(id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch prompt"))?;
    Ok(ApiResponse::ok("Prompt retrieved successfully", record))
}

#[utoipa::path(
    delete,
    path = "/api/ai/prompts/{id}",
    params(
        ("id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt deleted successfully", body = DeletedPrompt),
        (status = 400, description = "Invalid prompt ID format"),
        (status = 404, description = "Prompt not found")
    ),
    tag = "AI"
)]
pub async fn delete_prompt(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
) -> ApiResult<ApiResponse<DeletedPrompt>> {
    let id = parse_id(PROMPT, &raw)?;
    let record = state
        .advisor
        .delete_prompt(id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete prompt"))?;
    Ok(ApiResponse::ok(
        "Prompt deleted successfully",
        DeletedPrompt {
            deleted_prompt: PromptPreview::from(&record),
        },
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai/prompt", post(general_prompt))
        .route("/api/ai/diagnose", post(diagnose))
        .route("/api/ai/treatment", post(treatment))
        .route("/api/ai/prevention", post(prevention))
        .route("/api/ai/disease-info", post(disease_info))
        .route("/api/ai/ai-treatment", post(ai_treatment))
        .route("/api/ai/prompts", get(list_prompts))
        .route("/api/ai/prompts/:id", get(get_prompt).delete(delete_prompt))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{test_app, ScriptedAdvisor};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_diagnose_answers_and_saves() {
        let app = test_app(Some(ScriptedAdvisor::answering("Likely early blight.")));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/diagnose",
            Some(json!({ "symptoms": "Concentric rings on leaves", "plantType": "Tomato" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Disease diagnosis completed");
        assert_eq!(body["data"]["diagnosis"], "Likely early blight.");
        assert_eq!(body["data"]["plantType"], "Tomato");
        assert_eq!(body["data"]["saved"], true);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, &format!("/api/ai/prompts/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["promptType"], "diagnosis");
        assert_eq!(body["data"]["aiResponse"], "Likely early blight.");
    }

    #[tokio::test]
    async fn test_missing_required_field() {
        let app = test_app(Some(ScriptedAdvisor::answering("unused")));
        let (status, body) = send(&app, Method::POST, "/api/ai/treatment", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Disease name is required");
    }

    #[tokio::test]
    async fn test_without_key_is_unauthorized() {
        let app = test_app(None);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/prompt",
            Some(json!({ "prompt": "How often should I water tomatoes?" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or missing API key");

        let (status, _) = send(&app, Method::GET, "/api/ai/prompts", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_provider_failure_uses_endpoint_message() {
        let app = test_app(Some(ScriptedAdvisor::failing("quota exceeded")));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/prevention",
            Some(json!({ "plantType": "Potato", "commonDiseases": ["Late Blight", "Scab"] })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to generate prevention strategies");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_prompt_history_lifecycle() {
        let app = test_app(Some(ScriptedAdvisor::answering("answer")));
        for prompt in ["first question", "second question", "third question"] {
            let (status, _) =
                send(&app, Method::POST, "/api/ai/prompt", Some(json!({ "prompt": prompt }))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, Method::GET, "/api/ai/prompts?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Prompts retrieved successfully");
        assert_eq!(body["data"]["prompts"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["pagination"]["totalItems"], 3);
        assert_eq!(body["data"]["pagination"]["hasNextPage"], true);

        let id = body["data"]["prompts"][0]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/ai/prompts/{}", id);
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["deletedPrompt"]["userPrompt"]
            .as_str()
            .unwrap()
            .ends_with("..."));

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Prompt not found");

        let (status, body) = send(&app, Method::GET, "/api/ai/prompts/12345", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid prompt ID format");
    }
}
