use std::sync::Arc;

use anyhow::{Context, Result};
use courier_config::Config;
use courier_shared::broker;
use courier_shared::handlers;
use courier_shared::store::MessageStore;
use tokio::sync::watch;
use tracing::{error, info};
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

    info!("=== Receiver Service Starting ===");
    info!("Broker: {}:{}", config.broker.host, config.broker.port);
    info!("Queue: {}", config.broker.queue);

    // Connect to the broker with bounded retry; exhaustion aborts startup
    let connection = broker::connect(&config.broker)
        .await
        .context("Failed to establish broker connection")?;

    let channel = broker::declare_queue(&connection, &config.broker.queue)
        .await
        .context("Failed to declare queue")?;

    // The store is shared by handle between the consumer loop and the HTTP
    // handlers; it lives for the entire process
    let store = Arc::new(MessageStore::new());

    // Consumer loop runs as its own task, independent of request handling
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer_handle = {
        let store = store.clone();
        let queue = config.broker.queue.clone();
        tokio::spawn(async move {
            if let Err(e) = broker::run_consumer(channel, &queue, store, shutdown_rx).await {
                error!(error = %e, "Consumer loop failed");
            }
        })
    };

    let app = handlers::receiver_router(store.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Receiver service listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(courier_shared::shutdown_signal())
        .await
        .context("Failed to start server")?;

    // HTTP server is down; stop the consumer loop and release the broker
    info!("Stopping consumer loop...");
    shutdown_tx.send(true).ok();
    if let Err(e) = consumer_handle.await {
        error!(error = %e, "Consumer task panicked");
    }

    if let Err(e) = connection.close(200, "receiver-service shutdown").await {
        tracing::warn!(error = %e, "Failed to close broker connection cleanly");
    }

    info!(stored = store.count(), "Receiver service stopped gracefully");
    Ok(())
}
