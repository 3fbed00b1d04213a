// ============================================================================
// Consumer Loop - At-Most-Once Delivery
// ============================================================================
//
// Subscribes with `no_ack = true`: a message is consumed the moment the
// broker hands it over, independent of whether downstream processing
// succeeds. A deserialization or store failure after receipt drops that one
// message permanently — no redelivery. This matches the sender side's
// fire-and-forget publish; the pipeline is at-most-once end to end.
//
// A single malformed payload must never terminate the loop: it is logged,
// counted, and skipped.
//
// ============================================================================

use std::sync::Arc;

use courier_error::ProcessingError;
use courier_metrics::{MESSAGES_CONSUMED_TOTAL, MESSAGES_DROPPED_TOTAL};
use futures_util::{Stream, StreamExt};
use lapin::Channel;
use lapin::options::BasicConsumeOptions;
use lapin::types::FieldTable;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::message::Message;
use crate::store::MessageStore;

/// Subscribe to `queue` and append every well-formed inbound message to the
/// store until the shutdown channel fires or the delivery stream ends.
///
/// Runs for the lifetime of the process as its own task, independent of
/// HTTP request handling. Cancellation is cooperative: the signal is
/// observed in the same `select!` as the delivery stream, so the loop stops
/// within one iteration; an in-flight message is allowed to finish.
pub async fn run_consumer(
    channel: Channel,
    queue: &str,
    store: Arc<MessageStore>,
    shutdown: watch::Receiver<bool>,
) -> Result<(), lapin::Error> {
    let consumer = channel
        .basic_consume(
            queue,
            "receiver-service",
            BasicConsumeOptions {
                // At-most-once: consumed on receipt, lost on processing failure
                no_ack: true,
                ..BasicConsumeOptions::default()
            },
            FieldTable::default(),
        )
        .await?;

    info!(queue, "Consumer subscribed");

    let deliveries = consumer.map(|delivery| delivery.map(|d| d.data));
    drain_deliveries(deliveries, store, shutdown).await;

    Ok(())
}

/// Drain payloads from the delivery stream into the store.
///
/// Split from the subscription so the loop body is testable without a
/// broker.
async fn drain_deliveries<S>(
    mut deliveries: S,
    store: Arc<MessageStore>,
    mut shutdown: watch::Receiver<bool>,
) where
    S: Stream<Item = Result<Vec<u8>, lapin::Error>> + Unpin,
{
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                info!("Shutdown requested, stopping consumer loop");
                break;
            }
            delivery = deliveries.next() => {
                match delivery {
                    Some(Ok(payload)) => {
                        if let Err(e) = process_delivery(&store, &payload) {
                            MESSAGES_DROPPED_TOTAL.inc();
                            warn!(error = %e, "Dropping message that failed processing");
                        }
                    }
                    Some(Err(e)) => {
                        // Broker-side delivery error; the subscription itself
                        // is still alive, keep consuming
                        error!(error = %e, "Delivery error from broker");
                    }
                    None => {
                        warn!("Delivery stream ended, stopping consumer loop");
                        break;
                    }
                }
            }
        }
    }
}

/// Materialize one inbound payload and append it to the store.
pub fn process_delivery(store: &MessageStore, payload: &[u8]) -> Result<(), ProcessingError> {
    let message = Message::from_bytes(payload)?;

    debug!(text = %message.text, timestamp = %message.timestamp, "Message received");
    store.append(message);
    MESSAGES_CONSUMED_TOTAL.inc();

    Ok(())
}
