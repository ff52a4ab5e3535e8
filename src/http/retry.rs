//! Backoff for caller-driven retries.
//!
//! The client never retries on its own. Callers that want to resume a failed
//! operation (e.g. re-invoking an unspents listing after a 5xx) use
//! [`RetryConfig`] to decide whether and how long to wait.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{SdkError, TransportError};

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    /// `None` retries until the context is cancelled.
    pub max_retries: Option<u32>,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: Some(3),
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Wait the same `delay` between unlimited attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            max_retries: None,
            initial_delay: delay,
            max_delay: delay,
            backoff_factor: 1.0,
            jitter: false,
        }
    }

    /// Whether `err` on the given attempt (0-indexed) deserves another try.
    pub fn should_retry(&self, attempt: u32, err: &SdkError) -> bool {
        let budget_left = self.max_retries.map_or(true, |max| attempt < max);
        budget_left && err.is_retryable()
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt.min(32) as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    /// Sleep for the attempt's delay, or return early if `ctx` is cancelled.
    pub async fn wait(&self, attempt: u32, ctx: &CancellationToken) -> Result<(), SdkError> {
        let delay = self.delay_for_attempt(attempt);
        tracing::debug!(
            attempt = attempt + 1,
            max = ?self.max_retries,
            delay_ms = delay.as_millis() as u64,
            "Waiting before retry"
        );
        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(TransportError::Cancelled.into()),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}
