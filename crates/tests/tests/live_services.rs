mod common;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{chat, config_for, spawn};
use serde::Deserialize;
use serde_json::{json, Value};
use yatra_api::build_app_with;
use yatra_llm::LlmStack;

#[derive(Debug, Deserialize)]
struct PairQuery {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct LocationQuery {
    location: String,
}

async fn live_weather(Query(query): Query<LocationQuery>) -> Json<Value> {
    Json(json!({
        "location": query.location,
        "real_time_weather": {
            "temperature": 34.2,
            "weather_condition": "Hazy",
            "humidity": 48,
            "wind_speed": 2.5,
            "wind_direction": "North"
        }
    }))
}

async fn live_route(Query(query): Query<PairQuery>) -> Json<Value> {
    assert!(query.start.ends_with(",India"));
    assert!(query.end.ends_with(",India"));
    Json(json!({ "distance_km": 150.04, "eta": { "hours": 3, "minutes": 5 } }))
}

async fn live_trains_between(Query(query): Query<PairQuery>) -> Json<Value> {
    Json(json!({
        "trains": [{
            "train_number": 11007,
            "train_name": format!("{} {} Express", query.start, query.end),
            "departure_time": "06:40",
            "arrival_time": "09:57"
        }]
    }))
}

async fn live_train(Path(number): Path<String>) -> Json<Value> {
    Json(json!({
        "indian_railways": { "trains": [{
            "train_number": number,
            "train_name": "Live Express",
            "schedule": [
                { "stationName": "Origin", "departureTime": "05:00", "distance": 0 },
                { "stationName": "Terminus", "arrivalTime": "23:15", "distance": 1200 }
            ]
        }]}
    }))
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn nonsense() -> Json<Value> {
    Json(json!({ "unexpected": true }))
}

async fn app_against(collaborators: Router) -> Router {
    let base = spawn(collaborators).await;
    build_app_with(&config_for(&base), LlmStack::rules_only()).expect("app should build")
}

#[tokio::test]
async fn live_data_takes_precedence_over_fallback() {
    let app = app_against(
        Router::new()
            .route("/weather", get(live_weather))
            .route("/train-info/:number", get(live_train)),
    )
    .await;

    assert_eq!(
        chat(app.clone(), "What's the weather in Mumbai?").await,
        "The current weather in Mumbai is Hazy with temperature 34.2°C, humidity 48%, wind 2.5 m/s North."
    );
    assert_eq!(
        chat(app, "Tell me about train 12002").await,
        "Train 12002 (Live Express) starts at 05:00 and ends at 23:15, covering 1200 km."
    );
}

#[tokio::test]
async fn failing_or_malformed_services_fall_back() {
    let app = app_against(
        Router::new()
            .route("/train-info/:number", get(unavailable))
            .route("/route", get(nonsense))
            .route("/weather", get(nonsense)),
    )
    .await;

    assert!(chat(app.clone(), "Tell me about train 12951")
        .await
        .ends_with("covering 1384 km."));
    assert_eq!(
        chat(app.clone(), "How long does it take to drive from Delhi to Jaipur?").await,
        "By road, from Delhi to Jaipur it takes about 4 hours 50 minutes covering 281.6 km."
    );
    assert!(chat(app, "weather in Chennai")
        .await
        .starts_with("The current weather in Chennai is Mostly Cloudy"));
}

#[tokio::test]
async fn trip_mixes_live_and_fallback_facts() {
    let app = app_against(
        Router::new()
            .route("/route", get(live_route))
            .route("/trains-between", get(live_trains_between))
            .route("/weather", get(unavailable)),
    )
    .await;

    let reply = chat(app, "Plan a trip from Mumbai to Pune").await;
    let facts = reply
        .strip_prefix("Here's what I found:\n\n- ")
        .expect("bulleted reply")
        .split("\n- ")
        .collect::<Vec<_>>();

    assert_eq!(facts.len(), 4);
    assert_eq!(
        facts[0],
        "Train 11007 (Mumbai Pune Express) departs at 06:40 and arrives at 09:57."
    );
    assert_eq!(
        facts[1],
        "By road, from Mumbai to Pune it takes about 3 hours 5 minutes covering 150.04 km."
    );
    assert!(facts[2].starts_with("The current weather in Pune is Partly Cloudy"));
    assert!(facts[3].contains("Pune"));
}
