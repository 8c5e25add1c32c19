// crates/resilience/src/lib.rs
//! Guards for calls to the remote persona service
//!
//! - Retry with exponential backoff
//! - Circuit breaker
//! - Deadlines
//! - Call pacing for rate limited endpoints
//!
//! # Example
//!
//! ```rust
//! use mentorscroll_resilience::{CircuitBreaker, CircuitBreakerConfig, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(3).with_initial_delay(Duration::from_millis(100));
//! assert_eq!(policy.max_attempts(), 3);
//!
//! let breaker = CircuitBreaker::new(CircuitBreakerConfig::new(5, Duration::from_secs(30)));
//! assert!(breaker.can_proceed().is_ok());
//! ```

mod circuit_breaker;
mod error;
mod pacer;
mod retry;
mod timeout;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use error::{ResilienceError, ResilienceResult};
pub use pacer::Pacer;
pub use retry::{retry_if, with_retry, RetryPolicy};
pub use timeout::{with_timeout, Timeout};
