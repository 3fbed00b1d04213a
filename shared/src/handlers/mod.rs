//! HTTP surface for both services
//!
//! Thin adapters over the publisher and the message store; all real
//! decisions live in `broker` and `store`.

pub mod receiver;
pub mod sender;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::broker::Publisher;
use crate::store::MessageStore;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Router for the sender service: accepts messages and publishes them.
pub fn sender_router(publisher: Arc<Publisher>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::metrics::metrics_handler))
        .route("/api/message/send", post(sender::send_message))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(publisher)
}

/// Router for the receiver service: exposes the accumulated store.
pub fn receiver_router(store: Arc<MessageStore>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::metrics::metrics_handler))
        .route("/api/message/all", get(receiver::all_messages))
        .route("/api/message/count", get(receiver::message_count))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(store)
}
