//! Prometheus metrics for Courier services
//!
//! Provides centralized metrics collection for monitoring:
//! - Publish attempts and failures (sender side)
//! - Consumed and dropped messages (receiver side)
//! - Broker connection attempts
//! - In-memory store size

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{
    Encoder, IntCounter, IntGauge, TextEncoder, opts, register_int_counter, register_int_gauge,
};

// ============================================================================
// Sender Metrics
// ============================================================================

/// Total number of messages successfully published to the queue
pub static MESSAGES_PUBLISHED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "courier_messages_published_total",
        "Total number of messages successfully published to the queue"
    ))
    .expect("Failed to register MESSAGES_PUBLISHED_TOTAL metric")
});

/// Total number of failed publish attempts
pub static PUBLISH_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "courier_publish_failures_total",
        "Total number of failed publish attempts"
    ))
    .expect("Failed to register PUBLISH_FAILURES_TOTAL metric")
});

// ============================================================================
// Receiver Metrics
// ============================================================================

/// Total number of messages consumed and stored
pub static MESSAGES_CONSUMED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "courier_messages_consumed_total",
        "Total number of messages consumed from the queue and stored"
    ))
    .expect("Failed to register MESSAGES_CONSUMED_TOTAL metric")
});

/// Total number of inbound messages dropped due to processing failures
pub static MESSAGES_DROPPED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "courier_messages_dropped_total",
        "Total number of inbound messages dropped due to processing failures"
    ))
    .expect("Failed to register MESSAGES_DROPPED_TOTAL metric")
});

/// Current number of messages held in the in-memory store
pub static STORE_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(opts!(
        "courier_store_size",
        "Current number of messages held in the in-memory store"
    ))
    .expect("Failed to register STORE_SIZE metric")
});

// ============================================================================
// Broker Metrics
// ============================================================================

/// Total number of broker connection attempts (including retries)
pub static CONNECT_ATTEMPTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "courier_broker_connect_attempts_total",
        "Total number of broker connection attempts, including retries"
    ))
    .expect("Failed to register CONNECT_ATTEMPTS_TOTAL metric")
});

/// Gather all registered metrics in Prometheus text format
pub fn gather_metrics() -> Result<String> {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}
