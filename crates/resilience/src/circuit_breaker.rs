// crates/resilience/src/circuit_breaker.rs
//! Circuit breaker for a remote dependency

use crate::error::{ResilienceError, ResilienceResult};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests flow normally
    Closed,
    /// Requests are rejected without being sent
    Open,
    /// A trial request is allowed through to probe for recovery
    HalfOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the circuit opens
    failure_threshold: usize,
    /// How long the circuit stays open before probing
    cooldown: Duration,
    /// Successes needed in half-open state to close again
    success_threshold: usize,
}

impl CircuitBreakerConfig {
    pub fn new(failure_threshold: usize, cooldown: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            cooldown,
            success_threshold: 1,
        }
    }

    pub fn with_success_threshold(mut self, threshold: usize) -> Self {
        self.success_threshold = threshold.max(1);
        self
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(30))
    }
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    failure_count: usize,
    success_count: usize,
    last_failure: Option<Instant>,
}

/// Shared breaker; clones observe the same state
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: Arc<Mutex<BreakerState>>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                last_failure: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    pub fn record_success(&self) {
        let mut state = self.lock();
        match state.state {
            CircuitState::HalfOpen => {
                state.success_count += 1;
                if state.success_count >= self.config.success_threshold {
                    log::info!("Circuit closed after successful probe");
                    state.state = CircuitState::Closed;
                    state.failure_count = 0;
                    state.success_count = 0;
                }
            }
            CircuitState::Closed => state.failure_count = 0,
            CircuitState::Open => {}
        }
    }

    pub fn record_failure(&self) {
        let mut state = self.lock();
        state.failure_count += 1;
        state.success_count = 0;
        state.last_failure = Some(Instant::now());

        let trips = state.state == CircuitState::HalfOpen
            || state.failure_count >= self.config.failure_threshold;
        if trips && state.state != CircuitState::Open {
            log::warn!(
                "Circuit opened after {} failures, cooling down for {:?}",
                state.failure_count,
                self.config.cooldown
            );
            state.state = CircuitState::Open;
        }
    }

    /// Checks whether a request may be sent now
    ///
    /// An open circuit moves to half-open once the cooldown has passed.
    pub fn can_proceed(&self) -> ResilienceResult<()> {
        let mut state = self.lock();
        if state.state != CircuitState::Open {
            return Ok(());
        }

        let since = state
            .last_failure
            .map_or(Duration::ZERO, |at| at.elapsed());
        if since >= self.config.cooldown {
            state.state = CircuitState::HalfOpen;
            state.success_count = 0;
            Ok(())
        } else {
            Err(ResilienceError::CircuitBreakerOpen {
                failures: state.failure_count,
                last_failure_ago: since,
            })
        }
    }

    pub fn reset(&self) {
        let mut state = self.lock();
        state.state = CircuitState::Closed;
        state.failure_count = 0;
        state.success_count = 0;
        state.last_failure = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::default());
        assert_eq!(cb.state(), CircuitState::Closed);
        assert!(cb.can_proceed().is_ok());
    }

    #[test]
    fn test_opens_after_threshold() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::new(3, Duration::from_secs(1)));

        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(matches!(
            cb.can_proceed(),
            Err(ResilienceError::CircuitBreakerOpen { failures: 3, .. })
        ));
    }

    #[test]
    fn test_success_resets_failure_count() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::new(2, Duration::from_secs(1)));
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_after_cooldown() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::new(2, Duration::from_millis(50)));
        cb.record_failure();
        cb.record_failure();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cb.can_proceed().is_ok());
        assert_eq!(cb.state(), CircuitState::HalfOpen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closes_after_success_threshold() {
        let cb = CircuitBreaker::new(
            CircuitBreakerConfig::new(2, Duration::from_millis(50)).with_success_threshold(2),
        );
        cb.record_failure();
        cb.record_failure();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let _ = cb.can_proceed();

        cb.record_success();
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        cb.record_success();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_probe_reopens() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::new(3, Duration::from_millis(50)));
        for _ in 0..3 {
            cb.record_failure();
        }
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cb.can_proceed().is_ok());

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(cb.can_proceed().is_err());
    }

    #[test]
    fn test_reset() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::new(1, Duration::from_secs(60)));
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        cb.reset();
        assert_eq!(cb.state(), CircuitState::Closed);
    }
}
