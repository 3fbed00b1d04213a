use std::sync::{PoisonError, RwLock};

use crate::message::Message;

use courier_metrics::STORE_SIZE;

/// Append-only, unbounded, in-memory store of received messages.
///
/// Shared by handle (`Arc<MessageStore>`) between the consumer loop and the
/// HTTP handlers; never ambient global state. Appends are linearizable and
/// reads return a snapshot, so a read in progress is never torn by a
/// concurrent append. No eviction, no capacity bound, no deduplication:
/// process-lifetime retention is intentional.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message. Safe to call from the consumer's delivery context
    /// at any time; the critical section is a single push.
    pub fn append(&self, message: Message) {
        let mut messages = self
            .messages
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        messages.push(message);
        STORE_SIZE.set(messages.len() as i64);
    }

    /// Snapshot of all stored messages in arrival order.
    pub fn list(&self) -> Vec<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of stored messages.
    pub fn count(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
