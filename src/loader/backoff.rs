//! Retry Backoff
//!
//! Retry budget and exponential delay for failed loads.

use std::time::Duration;

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS};

/// Retry configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first retry; doubles for each following one
    pub base_delay: Duration,
    /// Maximum number of retries per failure streak
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    pub fn new(base_delay: Duration, max_retries: u32) -> Self {
        Self {
            base_delay,
            max_retries,
        }
    }

    /// Whether another retry fits in the budget after `retries_done`
    pub fn allows(&self, retries_done: u32) -> bool {
        retries_done < self.max_retries
    }

    /// Delay before the retry that follows `retries_done` earlier retries:
    /// `base_delay * 2^retries_done`, saturating
    pub fn delay_for(&self, retries_done: u32) -> Duration {
        let factor = 2u32.checked_pow(retries_done).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}
