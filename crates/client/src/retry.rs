//! Fixed-delay retry for the shared request path.
//!
//! Only server errors (5xx) are retried. Client errors, transport failures
//! and decoding errors surface on the first attempt.

use common::InsightError;
use domain::config::ApiConfig;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the initial attempt
    pub max_retries: usize,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_api(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.retry_attempts,
            delay: config.retry_delay(),
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Single attempt, no retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

/// Errors that can be classified as transient
pub trait RetryableError {
    fn is_retryable(&self) -> bool;

    fn error_type(&self) -> String;

    fn error_message(&self) -> String;
}

impl RetryableError for InsightError {
    fn is_retryable(&self) -> bool {
        self.is_server_error()
    }

    fn error_type(&self) -> String {
        self.error_code().to_string()
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the attempts are used up. The last error is returned unchanged.
pub async fn execute_with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError,
{
    let start_time = Instant::now();
    let max_attempts = config.max_retries + 1;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        operation = operation_name,
                        attempts = attempt,
                        "Operation succeeded after retry ({:?})",
                        start_time.elapsed()
                    );
                } else {
                    debug!(operation = operation_name, "Operation succeeded on first attempt");
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= max_attempts || !error.is_retryable() {
                    if error.is_retryable() {
                        warn!(
                            operation = operation_name,
                            attempts = attempt,
                            error_type = %error.error_type(),
                            "Operation failed after all attempts: {}",
                            error.error_message()
                        );
                    }
                    return Err(error);
                }

                warn!(
                    operation = operation_name,
                    attempt = attempt,
                    max_attempts = max_attempts,
                    "Operation failed, retrying in {:?}: {}",
                    config.delay,
                    error.error_message()
                );
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
        }
    }
}
