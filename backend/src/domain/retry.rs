//! Bounded retry of ledger operations that failed transiently.
//!
//! Deadlocks, lock timeouts and pool exhaustion roll the store transaction
//! back completely, so the whole operation can be re-run from scratch.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use super::ports::LedgerError;

/// Jittered exponential backoff for [`LedgerError::Transient`] failures.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use coinshop::domain::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(25), Duration::from_millis(500), 20);
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter_pct: u8,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(25), Duration::from_millis(500), 20)
    }
}

impl RetryPolicy {
    /// Build a policy, clamping inputs to sane bounds.
    ///
    /// `max_attempts` counts the first try and is at least 1; `jitter_pct`
    /// is capped at 100.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration, jitter_pct: u8) -> Self {
        let base_delay = base_delay.max(Duration::from_millis(1));
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: max_delay.max(base_delay),
            jitter_pct: jitter_pct.min(100),
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new(1, Duration::from_millis(1), Duration::from_millis(1), 0)
    }

    /// Same backoff with a different attempt budget (at least 1).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Total attempts including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn backoff(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
        if self.jitter_pct == 0 {
            return delay;
        }
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let spread = millis.saturating_mul(u64::from(self.jitter_pct)) / 100;
        let low = millis.saturating_sub(spread);
        let high = millis.saturating_add(spread);
        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, LedgerError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LedgerError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.backoff(attempt - 1);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "retrying ledger operation after transient failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
