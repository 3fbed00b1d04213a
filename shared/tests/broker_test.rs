// ============================================================================
// Broker Integration Tests
// ============================================================================
// Tests marked #[ignore] require a RabbitMQ instance on localhost:5672 with
// the default guest/guest credentials (e.g. `docker run -p 5672:5672
// rabbitmq:3`). The retry-exhaustion test only needs a closed port and runs
// everywhere.

use std::sync::Arc;
use std::time::Duration;

use courier_config::BrokerConfig;
use courier_shared::broker::{self, Publisher, RetryPolicy};
use courier_shared::message::Message;
use courier_shared::store::MessageStore;
use lapin::options::BasicPublishOptions;
use lapin::BasicProperties;
use tokio::sync::watch;

fn local_broker_config(queue: &str) -> BrokerConfig {
    BrokerConfig {
        host: "localhost".to_string(),
        port: 5672,
        username: "guest".to_string(),
        password: "guest".to_string(),
        queue: queue.to_string(),
    }
}

/// Queue name unique per test run so runs don't observe each other's
/// leftovers (the queues are non-durable but the broker may outlive a run).
fn unique_queue(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn wait_for_count(store: &MessageStore, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while store.count() < expected {
        assert!(
            tokio::time::Instant::now() < deadline,
            "store never reached {} messages (has {})",
            expected,
            store.count()
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn test_connect_exhausts_retry_budget_against_closed_port() {
    // Port 1 refuses connections immediately; no broker required
    let config = BrokerConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        username: "guest".to_string(),
        password: "guest".to_string(),
        queue: "messages".to_string(),
    };
    let policy = RetryPolicy {
        max_attempts: 3,
        delay: Duration::ZERO,
    };

    let result = tokio::time::timeout(
        Duration::from_secs(30),
        broker::connect_with_policy(&config, &policy),
    )
    .await
    .expect("Connection attempts did not finish in time");

    let err = result.expect_err("Connecting to a closed port should fail");
    assert_eq!(err.attempts, 3);
}

#[tokio::test]
#[ignore] // Requires RabbitMQ
async fn test_queue_declaration_is_idempotent() {
    let queue = unique_queue("courier-test-declare");
    let config = local_broker_config(&queue);

    let connection = broker::connect(&config)
        .await
        .expect("Failed to connect to RabbitMQ");

    // Declaring the same queue twice with identical parameters must succeed
    broker::declare_queue(&connection, &queue)
        .await
        .expect("First declaration failed");
    broker::declare_queue(&connection, &queue)
        .await
        .expect("Redeclaration with identical parameters failed");

    connection.close(200, "test done").await.ok();
}

#[tokio::test]
#[ignore] // Requires RabbitMQ
async fn test_publish_consume_round_trip() {
    let queue = unique_queue("courier-test-roundtrip");
    let config = local_broker_config(&queue);

    let connection = broker::connect(&config)
        .await
        .expect("Failed to connect to RabbitMQ");
    let publish_channel = broker::declare_queue(&connection, &queue)
        .await
        .expect("Failed to declare queue");
    let consume_channel = broker::declare_queue(&connection, &queue)
        .await
        .expect("Failed to declare queue for consumer");

    let store = Arc::new(MessageStore::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer_store = store.clone();
    let consumer_queue = queue.clone();
    let consumer = tokio::spawn(async move {
        broker::run_consumer(consume_channel, &consumer_queue, consumer_store, shutdown_rx).await
    });

    let publisher = Publisher::new(publish_channel, queue.clone());
    let sent = Message::new("round trip", None);
    publisher.publish(&sent).await.expect("Publish failed");

    wait_for_count(&store, 1).await;

    let received = &store.list()[0];
    assert_eq!(received, &sent);

    shutdown_tx.send(true).ok();
    consumer.await.expect("Consumer task panicked").expect("Consumer failed");
    connection.close(200, "test done").await.ok();
}

#[tokio::test]
#[ignore] // Requires RabbitMQ
async fn test_malformed_frame_is_dropped_and_later_messages_survive() {
    let queue = unique_queue("courier-test-malformed");
    let config = local_broker_config(&queue);

    let connection = broker::connect(&config)
        .await
        .expect("Failed to connect to RabbitMQ");
    let publish_channel = broker::declare_queue(&connection, &queue)
        .await
        .expect("Failed to declare queue");
    let consume_channel = broker::declare_queue(&connection, &queue)
        .await
        .expect("Failed to declare queue for consumer");

    let store = Arc::new(MessageStore::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer_store = store.clone();
    let consumer_queue = queue.clone();
    let consumer = tokio::spawn(async move {
        broker::run_consumer(consume_channel, &consumer_queue, consumer_store, shutdown_rx).await
    });

    let publisher = Publisher::new(publish_channel.clone(), queue.clone());

    // valid A, raw malformed frame, valid B
    publisher
        .publish(&Message::new("A", None))
        .await
        .expect("Publish A failed");
    publish_channel
        .basic_publish(
            "",
            &queue,
            BasicPublishOptions::default(),
            b"this is not a message",
            BasicProperties::default(),
        )
        .await
        .expect("Raw publish failed")
        .await
        .expect("Raw publish confirmation failed");
    publisher
        .publish(&Message::new("B", None))
        .await
        .expect("Publish B failed");

    wait_for_count(&store, 2).await;

    // The malformed frame is absent, order of the valid ones preserved
    let texts: Vec<_> = store.list().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["A".to_string(), "B".to_string()]);

    shutdown_tx.send(true).ok();
    consumer.await.expect("Consumer task panicked").expect("Consumer failed");
    connection.close(200, "test done").await.ok();
}
