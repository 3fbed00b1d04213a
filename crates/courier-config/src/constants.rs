// ============================================================================
// Configuration Constants
// ============================================================================

use std::time::Duration;

// Broker defaults (match the docker-compose service name and RabbitMQ's
// out-of-the-box credentials)
pub const DEFAULT_BROKER_HOST: &str = "rabbitmq";
pub const DEFAULT_BROKER_PORT: u16 = 5672;
pub const DEFAULT_BROKER_USERNAME: &str = "guest";
pub const DEFAULT_BROKER_PASSWORD: &str = "guest";

/// Queue both services agree on. Non-durable, single queue by design.
pub const DEFAULT_QUEUE_NAME: &str = "messages";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_RUST_LOG: &str = "info";

// Startup connection retry budget. The broker is frequently not yet ready
// when a service starts in an orchestrated environment; after the last
// failed attempt startup aborts rather than running degraded.
pub const CONNECT_MAX_ATTEMPTS: u32 = 10;
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);
