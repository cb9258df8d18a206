// Path: crates/client/src/retry.rs
use hgsdk_types::config::ClientConfig;
use std::time::Duration;

/// Attempt budget and exponential backoff for one retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// The policy for submitting to nodes.
    pub fn submission(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            min_backoff: config.min_backoff(),
            max_backoff: config.max_backoff(),
        }
    }

    /// The policy for polling receipts. Separate from submission so a slow
    /// consensus round does not eat into the submission budget.
    pub fn receipt(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.receipt.max_attempts,
            min_backoff: Duration::from_millis(config.receipt.min_backoff_ms),
            max_backoff: Duration::from_millis(config.receipt.max_backoff_ms),
        }
    }

    /// Delay before retry number `retry` (0-based): `min · 2^retry`, capped at
    /// `max`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.min_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}
