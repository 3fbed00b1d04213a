use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use courier_error::AppError;

use crate::broker::Publisher;
use crate::message::Message;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    /// Optional; the server assigns the current time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /api/message/send
///
/// Builds the message (timestamp defaults to send time), publishes it once,
/// and reports the outcome. A publish failure becomes a 500 with
/// `{"success": false, "error": ...}`; the process keeps running.
pub async fn send_message(
    State(publisher): State<Arc<Publisher>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = Message::new(request.text, request.timestamp);

    publisher.publish(&message).await?;

    info!(text = %message.text, timestamp = %message.timestamp, "Message sent");

    Ok(Json(json!({
        "success": true,
        "message": "Message sent successfully",
    })))
}
