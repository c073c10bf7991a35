//! Progress polling for a running generation job.
//!
//! The job record may not exist yet right after `POST /generate`, so a few
//! consecutive 404s are tolerated before giving up. Any other failure stops
//! the poller immediately.

use crate::client::ApiClient;
use async_trait::async_trait;
use common::InsightResult;
use domain::config::PollingConfig;
use domain::{GenerationState, GenerationStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Message surfaced when the status endpoint cannot be read
pub const STATUS_FETCH_FAILED: &str = "Failed to fetch generation status";

/// Where the poller reads job status from
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, progress_key: &str) -> InsightResult<GenerationStatus>;

    async fn clear_status(&self, progress_key: &str) -> InsightResult<()>;
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, progress_key: &str) -> InsightResult<GenerationStatus> {
        self.generation_status(progress_key).await
    }

    async fn clear_status(&self, progress_key: &str) -> InsightResult<()> {
        self.clear_generation_status(progress_key).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The job finished and the completion callback ran
    Completed(GenerationStatus),
    /// The server reported a failure, or the status could not be fetched
    Failed(String),
    Cancelled,
}

pub struct GenerationPoller<S: StatusSource + 'static> {
    source: Arc<S>,
    config: PollingConfig,
    cancel: CancellationToken,
}

impl<S: StatusSource + 'static> GenerationPoller<S> {
    pub fn new(source: Arc<S>, config: PollingConfig) -> Self {
        Self {
            source,
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the poller and suppresses the completion callback
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Poll `progress_key` until the job reaches a terminal state.
    ///
    /// `observer` sees every accepted status. `on_complete` runs exactly once,
    /// after the completion delay, and only when the job completed.
    pub async fn run<O, C>(&self, progress_key: &str, mut observer: O, on_complete: C) -> PollOutcome
    where
        O: FnMut(&GenerationStatus),
        C: FnOnce(&GenerationStatus),
    {
        let mut not_found = 0u32;
        info!(progress_key, "Polling generation status");

        loop {
            if self.cancel.is_cancelled() {
                debug!(progress_key, "Polling cancelled");
                return PollOutcome::Cancelled;
            }

            match self.source.fetch_status(progress_key).await {
                Ok(status) => {
                    not_found = 0;
                    observer(&status);
                    match status.status {
                        GenerationState::InProgress => {
                            if !self.pause(self.config.interval()).await {
                                return PollOutcome::Cancelled;
                            }
                        }
                        GenerationState::Completed => {
                            info!(progress_key, "Generation completed");
                            self.clear_in_background(progress_key);
                            if !self.pause(self.config.completion_delay()).await {
                                return PollOutcome::Cancelled;
                            }
                            on_complete(&status);
                            return PollOutcome::Completed(status);
                        }
                        GenerationState::Failed => {
                            let message = status
                                .error
                                .clone()
                                .unwrap_or_else(|| "Generation failed".to_string());
                            error!(progress_key, error = %message, "Generation failed");
                            return PollOutcome::Failed(message);
                        }
                    }
                }
                Err(e) if e.is_not_found() && not_found < self.config.max_not_found_retries => {
                    not_found += 1;
                    warn!(
                        progress_key,
                        attempt = not_found,
                        max = self.config.max_not_found_retries,
                        "Generation status not found yet"
                    );
                    if !self.pause(self.config.interval()).await {
                        return PollOutcome::Cancelled;
                    }
                }
                Err(e) => {
                    error!(progress_key, error = %e, "Status polling stopped");
                    return PollOutcome::Failed(STATUS_FETCH_FAILED.to_string());
                }
            }
        }
    }

    /// Sleep unless cancelled first; false when cancelled
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }

    fn clear_in_background(&self, progress_key: &str) {
        let source = Arc::clone(&self.source);
        let key = progress_key.to_string();
        tokio::spawn(async move {
            if let Err(e) = source.clear_status(&key).await {
                warn!(progress_key = %key, error = %e, "Failed to clear generation status");
            }
        });
    }
}
