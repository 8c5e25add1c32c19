// crates/resilience/src/error.rs
//! Error types for resilience operations

use std::time::Duration;
use thiserror::Error;

/// Result type for resilience operations
pub type ResilienceResult<T> = Result<T, ResilienceError>;

/// Errors raised by the guards themselves, not by the guarded operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResilienceError {
    /// Operation did not finish in time
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts exhausted: {last_error}")]
    RetriesExhausted { attempts: usize, last_error: String },

    /// Circuit breaker is open
    #[error(
        "Circuit breaker is open (failures: {failures}, last failure: {last_failure_ago:?} ago)"
    )]
    CircuitBreakerOpen {
        failures: usize,
        last_failure_ago: Duration,
    },
}

impl ResilienceError {
    /// True for failures that may clear up if the caller waits
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::CircuitBreakerOpen { .. })
    }
}
