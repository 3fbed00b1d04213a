use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::json;

use crate::message::Message;
use crate::store::MessageStore;

/// GET /api/message/all — snapshot of every stored message in arrival order.
pub async fn all_messages(State(store): State<Arc<MessageStore>>) -> Json<Vec<Message>> {
    Json(store.list())
}

/// GET /api/message/count
pub async fn message_count(State(store): State<Arc<MessageStore>>) -> Json<serde_json::Value> {
    Json(json!({ "count": store.count() }))
}
