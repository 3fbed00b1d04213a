use std::sync::Arc;

use anyhow::{Context, Result};
use courier_config::Config;
use courier_shared::broker::{self, Publisher};
use courier_shared::handlers;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Sender Service Starting ===");
    info!("Broker: {}:{}", config.broker.host, config.broker.port);
    info!("Queue: {}", config.broker.queue);

    // Connect to the broker with bounded retry; exhaustion aborts startup
    let connection = broker::connect(&config.broker)
        .await
        .context("Failed to establish broker connection")?;

    let channel = broker::declare_queue(&connection, &config.broker.queue)
        .await
        .context("Failed to declare queue")?;

    let publisher = Arc::new(Publisher::new(channel, config.broker.queue.clone()));

    let app = handlers::sender_router(publisher);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Sender service listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(courier_shared::shutdown_signal())
        .await
        .context("Failed to start server")?;

    // Graceful teardown of the broker link; best effort on the way out
    if let Err(e) = connection.close(200, "sender-service shutdown").await {
        tracing::warn!(error = %e, "Failed to close broker connection cleanly");
    }

    info!("Sender service stopped gracefully");
    Ok(())
}
