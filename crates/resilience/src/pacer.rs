// crates/resilience/src/pacer.rs
//! Minimum spacing between calls to a rate limited service

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Keeps successive calls at least `interval` apart
///
/// The first call goes through at once. Later calls wait out whatever is left
/// of the interval since the previous one was let through, or since it
/// finished when the caller reports that with [`Pacer::finished`].
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the next call is allowed, then claims the slot
    pub async fn ready(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let next = previous + self.interval;
            if next > Instant::now() {
                log::trace!("Pacing next call by {:?}", next - Instant::now());
                tokio::time::sleep_until(next).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Marks the current call as done; the interval now runs from here
    pub async fn finished(&self) {
        *self.last.lock().await = Some(Instant::now());
    }

    /// Forgets the previous call so the next one goes through at once
    pub async fn reset(&self) {
        *self.last.lock().await = None;
    }
}
