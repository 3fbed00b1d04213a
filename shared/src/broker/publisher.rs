use courier_error::PublishError;
use courier_metrics::{MESSAGES_PUBLISHED_TOTAL, PUBLISH_FAILURES_TOTAL};
use lapin::options::BasicPublishOptions;
use lapin::{BasicProperties, Channel};
use tracing::debug;

use crate::message::Message;

/// Publishes messages to the queue through the default exchange.
///
/// One publish attempt per call, no batching, no internal retry: retry
/// policy belongs to the caller. Failures carry the underlying cause and
/// are surfaced to the HTTP layer, never allowed to crash the process.
pub struct Publisher {
    channel: Channel,
    queue: String,
}

impl Publisher {
    pub fn new(channel: Channel, queue: impl Into<String>) -> Self {
        Self {
            channel,
            queue: queue.into(),
        }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Serialize `message` and publish it as one frame.
    pub async fn publish(&self, message: &Message) -> Result<(), PublishError> {
        match self.try_publish(message).await {
            Ok(()) => {
                MESSAGES_PUBLISHED_TOTAL.inc();
                debug!(queue = %self.queue, text = %message.text, "Message published");
                Ok(())
            }
            Err(e) => {
                PUBLISH_FAILURES_TOTAL.inc();
                Err(e)
            }
        }
    }

    async fn try_publish(&self, message: &Message) -> Result<(), PublishError> {
        let payload = message.to_bytes()?;

        self.channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default(),
            )
            .await?
            .await?;

        Ok(())
    }
}
