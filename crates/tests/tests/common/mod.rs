#![allow(dead_code)]

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use yatra_agents::AssistantConfig;

/// Nothing listens on the discard port, so every live call fails fast.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

pub fn config_for(collaborator_url: &str) -> AssistantConfig {
    AssistantConfig {
        collaborator_url: collaborator_url.to_string(),
        collaborator_timeout: Duration::from_secs(2),
        data_dir: None,
    }
}

pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    (status, serde_json::from_slice(&body).expect("json body"))
}

pub async fn post_message(app: Router, uri: &str, message: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "message": message }).to_string()))
        .expect("request");
    send(app, request).await
}

pub async fn chat(app: Router, message: &str) -> String {
    let (status, body) = post_message(app, "/chat", message).await;
    assert_eq!(status, StatusCode::OK);
    body["response"]
        .as_str()
        .expect("response string")
        .to_string()
}

/// Server-Sent Events body the way chat-completions endpoints stream it,
/// one delta per word.
pub fn sse_body(text: &str) -> String {
    let mut body = String::new();
    for (idx, word) in text.split_inclusive(' ').enumerate() {
        let chunk = serde_json::json!({
            "id": format!("chunk-{idx}"),
            "choices": [{ "index": 0, "delta": { "content": word } }],
        });
        body.push_str(&format!("data: {chunk}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}
