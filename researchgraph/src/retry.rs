//! Retry policy for flaky collaborator calls.
//!
//! Only web search is retried; LLM and extraction calls run once.

use std::future::Future;
use std::time::Duration;

/// How often, and how long between attempts, a failing call is retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Single attempt.
    None,
    /// Up to `max_attempts` attempts; the wait before retry `n` (1-based) is
    /// `initial_interval * 2^(n-1)`.
    Exponential {
        max_attempts: usize,
        initial_interval: Duration,
    },
}

impl Default for RetryPolicy {
    /// Three attempts, waiting 1s then 2s.
    fn default() -> Self {
        Self::exponential(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    pub fn exponential(max_attempts: usize, initial_interval: Duration) -> Self {
        Self::Exponential {
            max_attempts: max_attempts.max(1),
            initial_interval,
        }
    }

    /// Total attempts allowed, including the first.
    pub fn max_attempts(&self) -> usize {
        match self {
            Self::None => 1,
            Self::Exponential { max_attempts, .. } => *max_attempts,
        }
    }

    /// Wait after failed attempt `attempt` (0-based) before the next one.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Exponential {
                initial_interval, ..
            } => {
                let factor = 1u32.checked_shl(attempt as u32).unwrap_or(u32::MAX);
                initial_interval.saturating_mul(factor)
            }
        }
    }

    /// Runs `op` until it succeeds, `should_retry` rejects the error, or attempts
    /// run out. Returns the last error in the latter two cases.
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let max = self.max_attempts();
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    if attempt + 1 >= max || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = max,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
