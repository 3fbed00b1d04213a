use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use courier_config::{CONNECT_MAX_ATTEMPTS, CONNECT_RETRY_DELAY};
use tracing::{info, warn};

/// Bounded retry with a fixed inter-attempt delay.
///
/// Startup failure is a first-class outcome, not an exception path: the
/// caller gets back either the value or the final cause together with how
/// many attempts were made.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: CONNECT_MAX_ATTEMPTS,
            delay: CONNECT_RETRY_DELAY,
        }
    }
}

/// Run `op` until it succeeds or the attempt budget is exhausted.
///
/// Every attempt and every failure is logged; nothing is silently
/// swallowed. On exhaustion the underlying cause propagates along with the
/// attempt count.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut op: F,
) -> Result<T, (u32, E)>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        info!(
            attempt,
            max_attempts = policy.max_attempts,
            "Attempting {}...",
            what
        );

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= policy.max_attempts => {
                warn!(
                    error = %e,
                    attempts = attempt,
                    "{} failed, retry budget exhausted",
                    what
                );
                return Err((attempt, e));
            }
            Err(e) => {
                warn!(
                    error = %e,
                    attempt,
                    "{} failed, retrying in {:?}...",
                    what,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
