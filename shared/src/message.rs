use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The unit of transfer between sender and receiver.
///
/// Serialized as UTF-8 JSON `{"text": ..., "timestamp": ...}` with an
/// RFC 3339 timestamp; both services must agree on the field names
/// byte-for-byte, so they share this one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message. The timestamp is set exactly once, here: callers
    /// that do not supply one get the current time.
    pub fn new(text: impl Into<String>, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        }
    }

    /// Serialize to the wire payload published on the queue.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Reconstruct a message from a wire payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
