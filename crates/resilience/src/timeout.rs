// crates/resilience/src/timeout.rs
//! Deadlines for async operations

use crate::error::{ResilienceError, ResilienceResult};
use std::future::Future;
use std::time::Duration;

/// Runs `operation`, giving up once `duration` has passed
///
/// The future is dropped on timeout, which cancels any request in flight.
pub async fn with_timeout<F>(duration: Duration, operation: F) -> ResilienceResult<F::Output>
where
    F: Future,
{
    tokio::time::timeout(duration, operation)
        .await
        .map_err(|_| {
            log::warn!("Operation timed out after {:?}", duration);
            ResilienceError::Timeout(duration)
        })
}

/// Reusable deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Runs an operation under this deadline
    pub async fn run<F>(&self, operation: F) -> ResilienceResult<F::Output>
    where
        F: Future,
    {
        with_timeout(self.duration, operation).await
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::from_secs(30)
    }
}
