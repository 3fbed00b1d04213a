// ============================================================================
// Receiver HTTP Contract Tests
// ============================================================================
// Exercise the receiver router in-process with a seeded store; no broker or
// network needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use courier_shared::handlers;
use courier_shared::message::Message;
use courier_shared::store::MessageStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn get_json(store: Arc<MessageStore>, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = handlers::receiver_router(store);

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("Body is not JSON");

    (status, value)
}

#[tokio::test]
async fn test_all_returns_stored_messages_in_order() {
    let store = Arc::new(MessageStore::new());
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    store.append(Message::new("first", Some(timestamp)));
    store.append(Message::new("second", None));

    let (status, body) = get_json(store, "/api/message/all").await;

    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().expect("Expected a JSON array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["text"], "first");
    assert_eq!(messages[0]["timestamp"], "2024-05-01T09:00:00Z");
    assert_eq!(messages[1]["text"], "second");
}

#[tokio::test]
async fn test_all_returns_empty_array_when_nothing_received() {
    let store = Arc::new(MessageStore::new());

    let (status, body) = get_json(store, "/api/message/all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_count_matches_store_contents() {
    let store = Arc::new(MessageStore::new());
    for i in 0..5 {
        store.append(Message::new(format!("msg-{}", i), None));
    }

    let (status, body) = get_json(store, "/api/message/count").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let store = Arc::new(MessageStore::new());

    let (status, body) = get_json(store, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint_serves_prometheus_text() {
    let store = Arc::new(MessageStore::new());
    store.append(Message::new("tracked", None));

    let app = handlers::receiver_router(store);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let text = String::from_utf8(bytes.to_vec()).expect("Metrics are not UTF-8");
    assert!(text.contains("courier_store_size"));
}
