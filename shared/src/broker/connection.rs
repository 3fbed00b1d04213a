use courier_config::BrokerConfig;
use courier_error::ConnectionError;
use courier_metrics::CONNECT_ATTEMPTS_TOTAL;
use lapin::{Connection, ConnectionProperties};
use tracing::{error, info};

use super::retry::{RetryPolicy, with_retry};

/// Establish the process-wide broker connection with the default retry
/// budget (10 attempts, 2 s apart).
pub async fn connect(config: &BrokerConfig) -> Result<Connection, ConnectionError> {
    connect_with_policy(config, &RetryPolicy::default()).await
}

/// Establish the broker connection under an explicit retry policy.
///
/// Exactly one connection attempt sequence runs at startup; on exhaustion
/// the final cause propagates and the process must fail startup rather than
/// run without a broker.
pub async fn connect_with_policy(
    config: &BrokerConfig,
    policy: &RetryPolicy,
) -> Result<Connection, ConnectionError> {
    let uri = config.amqp_uri();

    let result = with_retry(policy, "broker connection", || {
        CONNECT_ATTEMPTS_TOTAL.inc();
        let uri = uri.clone();
        async move { Connection::connect(&uri, ConnectionProperties::default()).await }
    })
    .await;

    match result {
        Ok(connection) => {
            info!(host = %config.host, port = config.port, "Connected to broker");
            Ok(connection)
        }
        Err((attempts, source)) => {
            error!(
                host = %config.host,
                port = config.port,
                attempts,
                "Failed to connect to broker, aborting startup"
            );
            Err(ConnectionError { attempts, source })
        }
    }
}
