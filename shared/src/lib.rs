//! Shared library for the Courier services
//!
//! Holds everything both binaries need: the message type and its wire
//! codec, the broker integration (connection retry, queue declaration,
//! publisher, consumer loop), the in-memory message store, and the HTTP
//! routers.

pub mod broker;
pub mod handlers;
pub mod message;
pub mod metrics;
pub mod store;

use tracing::info;

/// Resolve when the process receives SIGTERM or SIGINT.
///
/// Used as the graceful-shutdown future for `axum::serve`; the receiver
/// binary additionally forwards the signal to the consumer loop.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, initiating graceful shutdown...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("SIGINT received, initiating graceful shutdown...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
        info!("Ctrl-C received, initiating graceful shutdown...");
    }
}
