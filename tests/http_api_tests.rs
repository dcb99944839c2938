//! Router-level tests for the HTTP API, exercised through
//! `tower::ServiceExt::oneshot` without binding a socket.

use std::time::{Duration, Instant};

use ars_rust::config::{DelayRange, ServiceConfig};
use ars_rust::http::{create_router, AppState};
use ars_rust::services::{CallbackClient, DeliveryStatus, DeliveryTracker, Dispatcher};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use uuid::Uuid;

/// Delay far longer than any test runs, so accepted requests stay pending.
fn slow_config() -> ServiceConfig {
    ServiceConfig {
        delay: DelayRange::new(30.0, 30.0),
        callback_timeout: Duration::from_secs(1),
        queue_capacity: 8,
        max_concurrent_calculations: 2,
    }
}

fn build_state(config: &ServiceConfig) -> AppState {
    let tracker = DeliveryTracker::new();
    let client = CallbackClient::new(config.callback_timeout).expect("callback client");
    let dispatcher = Dispatcher::start(config, tracker.clone(), client);
    AppState::new(dispatcher, tracker)
}

async fn post_calculation(router: &Router, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/calculations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

fn valid_body() -> String {
    serde_json::json!({
        "observationId": 7,
        "callbackUrl": "http://127.0.0.1:1/callback",
        "token": "INTERNAL123",
        "points": [
            {"ra": 10.0, "dec": 10.0, "date": "01.01.2024"},
            {"ra": 10.001, "dec": 10.0, "date": "02.01.2024"}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let state = build_state(&slow_config());
    let router = create_router(state);

    let (status, body) = get_json(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], "v1");
    assert_eq!(body["trackedRequests"], 0);
}

#[tokio::test]
async fn missing_token_is_rejected_and_nothing_is_scheduled() {
    let state = build_state(&slow_config());
    let router = create_router(state.clone());

    let body = serde_json::json!({
        "observationId": 7,
        "callbackUrl": "http://127.0.0.1:1/callback",
        "points": []
    })
    .to_string();

    let (status, json) = post_calculation(&router, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("token"));
    assert!(state.tracker.is_empty());
}

#[tokio::test]
async fn missing_observation_id_and_callback_url_are_rejected() {
    let state = build_state(&slow_config());
    let router = create_router(state.clone());

    let no_id = serde_json::json!({
        "callbackUrl": "http://127.0.0.1:1/callback",
        "token": "t"
    })
    .to_string();
    let (status, _) = post_calculation(&router, &no_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let blank_url = serde_json::json!({
        "observationId": 1,
        "callbackUrl": "",
        "token": "t"
    })
    .to_string();
    let (status, _) = post_calculation(&router, &blank_url).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(state.tracker.is_empty());
}

#[tokio::test]
async fn zero_observation_id_is_present_and_accepted() {
    let state = build_state(&slow_config());
    let router = create_router(state);

    let body = serde_json::json!({
        "observationId": 0,
        "callbackUrl": "http://127.0.0.1:1/callback",
        "token": "t",
        "points": []
    })
    .to_string();

    let (status, json) = post_calculation(&router, &body).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["observationId"], 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let state = build_state(&slow_config());
    let router = create_router(state.clone());

    let (status, json) = post_calculation(&router, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(state.tracker.is_empty());
}

#[tokio::test]
async fn valid_request_is_accepted_before_the_delay_elapses() {
    let state = build_state(&slow_config());
    let router = create_router(state.clone());

    let started = Instant::now();
    let (status, json) = post_calculation(&router, &valid_body()).await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::ACCEPTED);
    // The configured delay is 30s; acceptance must not wait on it.
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);

    assert_eq!(json["status"], "accepted");
    assert_eq!(json["observationId"], 7);

    let request_id: Uuid = json["requestId"]
        .as_str()
        .expect("requestId present")
        .parse()
        .expect("valid uuid");
    let record = state.tracker.get(&request_id).expect("tracked");
    assert!(matches!(
        record.status,
        DeliveryStatus::Queued | DeliveryStatus::Delayed
    ));
}

#[tokio::test]
async fn status_endpoint_returns_tracked_record() {
    let state = build_state(&slow_config());
    let router = create_router(state);

    let (_, json) = post_calculation(&router, &valid_body()).await;
    let request_id = json["requestId"].as_str().unwrap().to_string();

    let (status, record) = get_json(&router, &format!("/v1/calculations/{}", request_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["requestId"], request_id.as_str());
    assert_eq!(record["observationId"], 7);
    assert!(record["distanceKm"].is_null());
}

#[tokio::test]
async fn unknown_request_id_is_not_found() {
    let state = build_state(&slow_config());
    let router = create_router(state);

    let uri = format!("/v1/calculations/{}", Uuid::new_v4());
    let (status, json) = get_json(&router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn full_queue_rejects_with_service_unavailable() {
    let config = ServiceConfig {
        delay: DelayRange::new(30.0, 30.0),
        callback_timeout: Duration::from_secs(1),
        queue_capacity: 1,
        max_concurrent_calculations: 1,
    };
    let state = build_state(&config);
    let router = create_router(state.clone());

    // First job is picked up by the consumer and sleeps; second fills the
    // queue; third must be rejected.
    let (status, _) = post_calculation(&router, &valid_body()).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _) = post_calculation(&router, &valid_body()).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, json) = post_calculation(&router, &valid_body()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "OVERLOADED");

    // The rejected request leaves no tracker record behind.
    assert_eq!(state.tracker.len(), 2);
}
