//! Common types and utilities shared across domain models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in milliseconds since Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp for the current moment
    ///
    /// Falls back to 0 if the system clock reads before the Unix epoch.
    pub fn now() -> Self {
        Self(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_else(|_| std::time::Duration::from_secs(0))
                .as_millis() as i64,
        )
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn as_seconds(&self) -> i64 {
        self.0 / 1000
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can validate themselves
pub trait Validator {
    /// Validates the instance and returns every problem found
    fn validate(&self) -> Result<(), Vec<String>>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Collects validation messages, returning `Ok` when none were pushed
pub(crate) fn finish(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_millis() {
        let t = Timestamp::from_millis(1234567890123);
        assert_eq!(t.as_millis(), 1234567890123);
        assert_eq!(t.as_seconds(), 1234567890);
    }

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::from_millis(1000);
        let t2 = Timestamp::from_millis(2000);
        assert!(t1 < t2);
    }

    #[test]
    fn test_timestamp_display() {
        let t = Timestamp::from_millis(42);
        assert_eq!(t.to_string(), "42");
    }

    #[test]
    fn test_validator_trait() {
        struct Score(i32);

        impl Validator for Score {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors = Vec::new();
                if self.0 < 0 {
                    errors.push("Score must be positive".to_string());
                }
                finish(errors)
            }
        }

        assert!(Score(10).is_valid());
        assert!(!Score(-5).is_valid());
    }
}
