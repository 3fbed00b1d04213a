use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

// ============================================================================
// Startup Errors (fatal)
// ============================================================================

/// Broker unreachable after exhausting the retry budget.
///
/// Fatal: the process must fail startup rather than serve traffic without a
/// broker connection.
#[derive(Error, Debug)]
#[error("failed to connect to broker after {attempts} attempts: {source}")]
pub struct ConnectionError {
    /// Number of attempts made before giving up
    pub attempts: u32,
    #[source]
    pub source: lapin::Error,
}

/// Queue declaration failed, typically because the queue already exists with
/// different parameters. Fatal at startup: an environment misconfiguration
/// must be surfaced, never masked by silently redefining the queue.
#[derive(Error, Debug)]
#[error("failed to declare queue '{queue}': {source}")]
pub struct DeclarationError {
    pub queue: String,
    #[source]
    pub source: lapin::Error,
}

// ============================================================================
// Per-Operation Errors (recoverable)
// ============================================================================

/// Serialization or transport failure during a single publish.
///
/// Surfaced to the HTTP caller as a 500; never retried internally and never
/// fatal to the process.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to publish message to broker: {0}")]
    Transport(#[from] lapin::Error),
}

/// Failure while processing one inbound delivery on the consumer side.
///
/// The message is dropped and the consumer loop continues; a single
/// malformed payload must never terminate the loop.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("failed to deserialize message payload: {0}")]
    Deserialize(#[from] serde_json::Error),
}

// ============================================================================
// HTTP-Facing Error
// ============================================================================

/// Application error type for HTTP handlers
///
/// Maps errors to status codes and the `{"success": false, "error": ...}`
/// body shape both services use for failure responses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("message queue error: {0}")]
    Publish(#[from] PublishError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Publish(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
