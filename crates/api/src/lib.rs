use std::env;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use yatra_agents::{AssistantConfig, TravelAssistant};
use yatra_fallback::FallbackStats;
use yatra_llm::LlmStack;
use yatra_observability::{AppMetrics, MetricsSnapshot};

const MAX_MESSAGE_CHARS: usize = 2_000;

#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<TravelAssistant>,
    pub metrics: Arc<AppMetrics>,
    pub allowed_origins: Arc<Vec<String>>,
    pub collaborator_url: String,
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
    capabilities: HealthCapabilities,
    fallback: FallbackStats,
}

#[derive(Debug, Serialize)]
struct HealthCapabilities {
    language_model: bool,
    collaborator_url: String,
}

/// Builds the router from environment configuration.
pub fn build_app() -> Result<Router> {
    build_app_with(&AssistantConfig::from_env(), LlmStack::load_default())
}

pub fn build_app_with(config: &AssistantConfig, llm: LlmStack) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let assistant = TravelAssistant::from_config(config, llm, metrics.clone())?;

    let state = ApiState {
        assistant: Arc::new(assistant),
        metrics,
        allowed_origins: Arc::new(parse_allowed_origins()),
        collaborator_url: config.collaborator_url.clone(),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/v1/classify", post(classify))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        capabilities: HealthCapabilities {
            language_model: state.assistant.generative(),
            collaborator_url: state.collaborator_url.clone(),
        },
        fallback: state.assistant.fallback().stats(),
    };
    (StatusCode::OK, Json(payload))
}

/// Every well-formed request gets a 200 with a reply, including the
/// assistant's own apologies.
async fn chat(
    State(state): State<ApiState>,
    request: Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let message = match read_message(request) {
        Ok(message) => message,
        Err(response) => return response,
    };

    let response = state.assistant.handle_message(&message).await;
    (StatusCode::OK, Json(ChatResponse { response })).into_response()
}

async fn classify(
    State(state): State<ApiState>,
    request: Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let message = match read_message(request) {
        Ok(message) => message,
        Err(response) => return response,
    };

    let outcome = state.assistant.classify(&message).await;
    (StatusCode::OK, Json(outcome)).into_response()
}

fn read_message(request: Result<Json<MessageRequest>, JsonRejection>) -> Result<String, Response> {
    let Json(request) = request.map_err(|rejection| {
        bad_request("invalid_json", &rejection.body_text())
    })?;

    if request.message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(bad_request(
            "message_too_long",
            &format!("message must be at most {MAX_MESSAGE_CHARS} characters"),
        ));
    }
    Ok(request.message)
}

fn bad_request(code: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

fn parse_allowed_origins() -> Vec<String> {
    let default_origins = [
        "http://localhost:5000",
        "http://127.0.0.1:5000",
        "http://localhost:3000",
        "http://127.0.0.1:3000",
    ];

    env::var("YATRA_ALLOWED_ORIGINS")
        .ok()
        .map(|value| {
            value
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|| {
            default_origins
                .iter()
                .map(|value| value.to_string())
                .collect()
        })
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:3000")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
