//! RabbitMQ integration layer
//!
//! Connection establishment with bounded retry, idempotent queue
//! declaration, the publisher, and the consumer loop.

mod channel;
mod connection;
mod consumer;
mod publisher;
mod retry;

pub use channel::declare_queue;
pub use connection::{connect, connect_with_policy};
pub use consumer::{process_delivery, run_consumer};
pub use publisher::Publisher;
pub use retry::{RetryPolicy, with_retry};
