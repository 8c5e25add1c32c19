// crates/resilience/src/retry.rs
//! Retry policies with exponential backoff

use crate::error::ResilienceError;
use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first attempt)
    max_attempts: usize,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    use_jitter: bool,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            use_jitter: true,
        }
    }

    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self::new(1)
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Jitter scales each delay by a random factor in `[0.75, 1.0]`
    pub fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Delay to wait before retry number `attempt` (1 based)
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_delay =
            self.initial_delay.as_millis() as f64 * self.multiplier.powi((attempt - 1) as i32);
        let capped_delay = base_delay.min(self.max_delay.as_millis() as f64);

        let final_delay = if self.use_jitter {
            capped_delay * rand::rng().random_range(0.75..=1.0)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Runs `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or the policy runs out of attempts
///
/// The last error is returned unchanged so callers keep its type.
pub async fn retry_if<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_attempts() && should_retry(&e) => {
                let delay = policy.delay_for_attempt(attempt);
                log::debug!(
                    "Attempt {}/{} failed ({}), retrying in {:?}",
                    attempt,
                    policy.max_attempts(),
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Retries every failure, reporting exhaustion as a [`ResilienceError`]
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation: F,
) -> Result<T, ResilienceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry_if(policy, operation, |_| true)
        .await
        .map_err(|e| ResilienceError::RetriesExhausted {
            attempts: policy.max_attempts(),
            last_error: e.to_string(),
        })
}
