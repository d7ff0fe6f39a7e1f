mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{chat, config_for, post_message, send, UNREACHABLE_URL};
use yatra_api::build_app_with;
use yatra_llm::LlmStack;

fn offline_app() -> axum::Router {
    build_app_with(&config_for(UNREACHABLE_URL), LlmStack::rules_only()).expect("app should build")
}

#[tokio::test]
async fn health_reports_datasets_and_capabilities() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["capabilities"]["language_model"], false);
    assert_eq!(body["capabilities"]["collaborator_url"], UNREACHABLE_URL);
    assert!(body["fallback"]["trains"].as_u64().unwrap() > 0);
    assert_eq!(body["metrics"]["requests_total"], 0);
}

#[tokio::test]
async fn weather_answer_survives_services_being_down() {
    assert_eq!(
        chat(offline_app(), "What's the weather in Mumbai?").await,
        "The current weather in Mumbai is Clear with temperature 30°C, humidity 60%, wind 5 m/s West."
    );
}

#[tokio::test]
async fn train_number_answer_comes_from_bundled_schedule() {
    let reply = chat(offline_app(), "Tell me about train 12002").await;
    assert!(reply.starts_with("Train 12002 (New Delhi - Rani Kamlapati Shatabdi Express) starts at 06:00"));
}

#[tokio::test]
async fn unknown_and_invalid_messages_get_guidance() {
    assert_eq!(
        chat(offline_app(), "sing me a song").await,
        "I'm sorry, I couldn't understand your request. You can ask me about weather, train schedules, road routes, or tourist information about places in India."
    );
    assert_eq!(
        chat(offline_app(), "Is it raining in X").await,
        "Please specify a valid location for the weather."
    );
}

#[tokio::test]
async fn conversation_shortcuts_are_answered_over_http() {
    assert!(chat(offline_app(), "help").await.starts_with("I can help you with:"));
    assert_eq!(chat(offline_app(), "bye").await, "Goodbye! Have a great day!");
    assert!(chat(offline_app(), "").await.starts_with("Hello!"));
}

#[tokio::test]
async fn trip_planning_lists_every_fact() {
    let reply = chat(offline_app(), "I'm planning a trip from Mumbai to Pune").await;

    assert!(reply.starts_with("Here's what I found:\n\n- Train 12123 (Deccan Queen)"));
    assert!(reply.contains("\n- By road, from Mumbai to Pune it takes about 2 hours 55 minutes covering 149.2 km."));
    assert!(reply.contains("\n- The current weather in Pune is Partly Cloudy"));
    assert!(!reply.contains("Pune - "));
}

#[tokio::test]
async fn classify_endpoint_shows_validation() {
    let (status, body) = post_message(offline_app(), "/v1/classify", "How far is Agra from Delhi by car").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "rules");
    assert_eq!(body["classification"]["intent"], "road");
    assert_eq!(body["query"]["start"], "Agra");
    assert_eq!(body["query"]["end"], "Delhi");
    assert!(body["rejection"].is_null());
}
