use courier_error::DeclarationError;
use lapin::options::QueueDeclareOptions;
use lapin::types::FieldTable;
use lapin::{Channel, Connection};
use tracing::info;

/// Create a channel and declare the queue on it.
///
/// Declaration is idempotent: redeclaring an existing queue with identical
/// parameters succeeds without altering its state. If the queue already
/// exists with different parameters the broker rejects the declaration and
/// the error surfaces as fatal — an environment misconfiguration must never
/// be masked.
pub async fn declare_queue(connection: &Connection, queue: &str) -> Result<Channel, DeclarationError> {
    let channel = connection
        .create_channel()
        .await
        .map_err(|e| DeclarationError {
            queue: queue.to_string(),
            source: e,
        })?;

    channel
        .queue_declare(
            queue,
            QueueDeclareOptions {
                durable: false,
                exclusive: false,
                auto_delete: false,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await
        .map_err(|e| DeclarationError {
            queue: queue.to_string(),
            source: e,
        })?;

    info!(queue, "Queue declared");
    Ok(channel)
}
