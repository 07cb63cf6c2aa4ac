//! Exponential backoff for generation calls.

use std::future::Future;
use std::time::Duration;

use crate::constants::{RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_SECS};

/// How often and how patiently a failed call is repeated
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Extra attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(RETRY_INITIAL_DELAY_MS),
            max_delay: Duration::from_secs(RETRY_MAX_DELAY_SECS),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            max_delay,
        }
    }
}

/// Run `operation` until it succeeds, the error is not worth retrying, or the
/// retry budget is spent. The delay doubles after every failure, capped at
/// `config.max_delay`.
///
/// Returns the last error when giving up.
pub async fn with_retry<F, Fut, T, E, R>(
    config: &RetryConfig,
    mut operation: F,
    retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if attempt > config.max_retries || !retryable(&e) {
                    return Err(e);
                }

                tracing::warn!(
                    attempt,
                    max_attempts = config.max_retries + 1,
                    ?delay,
                    "Generation call failed: {}",
                    e
                );

                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(config.max_delay);
            }
        }
    }
}
