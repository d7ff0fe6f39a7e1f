mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use common::{chat, config_for, post_message, spawn, sse_body, UNREACHABLE_URL};
use serde_json::Value;
use yatra_api::build_app_with;
use yatra_llm::{LlmConfig, LlmStack};

const GENERATED_REPLY: &str = "Shimla is cloudy and cool at the moment, so pack a warm layer.";

#[derive(Clone, Default)]
struct StubModel {
    prompts: Arc<Mutex<Vec<String>>>,
}

async fn completions(
    State(stub): State<StubModel>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-key");
    if !authorized || payload["stream"] != true {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let prompt = payload["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    stub.prompts.lock().unwrap().push(prompt.clone());

    let text = if prompt.starts_with("User message:") {
        r#"Sure: {"intent": "weather", "location": "Shimla"}"#
    } else {
        GENERATED_REPLY
    };
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        sse_body(text),
    )
        .into_response()
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn llm_app(model: Router) -> Router {
    let base = spawn(model).await;
    let stack = LlmStack::from_config(LlmConfig {
        endpoint: format!("{base}/v1/chat/completions"),
        api_key: "test-key".to_string(),
        model: "stub-model".to_string(),
        timeout: Duration::from_secs(5),
    });
    assert!(stack.llm_enabled());
    build_app_with(&config_for(UNREACHABLE_URL), stack).expect("app should build")
}

#[tokio::test]
async fn model_classifies_and_writes_the_reply() {
    let stub = StubModel::default();
    let app = llm_app(
        Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(stub.clone()),
    )
    .await;

    let (status, body) =
        post_message(app.clone(), "/v1/classify", "Will I need a jacket up in the hills?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "llm");
    assert_eq!(body["query"]["intent"], "weather");
    assert_eq!(body["query"]["location"], "Shimla");

    let reply = chat(app, "Will I need a jacket up in the hills?").await;
    assert_eq!(reply, GENERATED_REPLY);

    let prompts = stub.prompts.lock().unwrap();
    let composition = prompts.last().expect("composition prompt");
    assert!(composition.starts_with("The user asked: \"Will I need a jacket up in the hills?\""));
    assert!(composition.contains("The current weather in Shimla is Cloudy with temperature 11.4°C"));
}

#[tokio::test]
async fn failing_model_degrades_to_rules_and_plain_replies() {
    let app = llm_app(Router::new().route("/v1/chat/completions", post(broken))).await;

    let (status, body) = post_message(app.clone(), "/v1/classify", "weather in Mumbai").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "rules");

    assert_eq!(
        chat(app.clone(), "What's the weather in Mumbai?").await,
        "The current weather in Mumbai is Clear with temperature 30°C, humidity 60%, wind 5 m/s West."
    );

    let (_, health) = common::send(
        app,
        axum::http::Request::builder()
            .uri("/health")
            .body(axum::body::Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(health["capabilities"]["language_model"], true);
}
