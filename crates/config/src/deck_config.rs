//! Deck navigation timing and input settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Transition timings in milliseconds and the drag threshold in pixels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeckConfig {
    pub nav_exit_ms: u64,
    pub nav_enter_ms: u64,
    pub shuffle_exit_ms: u64,
    pub shuffle_enter_ms: u64,
    pub drag_threshold: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            nav_exit_ms: 300,
            nav_enter_ms: 100,
            shuffle_exit_ms: 500,
            shuffle_enter_ms: 400,
            drag_threshold: 50.0,
        }
    }
}

impl ConfigSection for DeckConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let finite = if self.drag_threshold.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                "deck.drag_threshold",
                "must be a finite number",
                self.drag_threshold,
            ))
        };

        Validator::collect_errors(vec![
            finite,
            Validator::in_range(self.nav_exit_ms, 1, 5000, "deck.nav_exit_ms"),
            Validator::in_range(self.shuffle_exit_ms, 1, 5000, "deck.shuffle_exit_ms"),
            Validator::shorter_than(self.nav_enter_ms, self.nav_exit_ms, "deck.nav_enter_ms"),
            Validator::shorter_than(
                self.shuffle_enter_ms,
                self.shuffle_exit_ms,
                "deck.shuffle_enter_ms",
            ),
            Validator::in_range(self.drag_threshold, 1.0, 1000.0, "deck.drag_threshold"),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.nav_exit_ms = other.nav_exit_ms;
        self.nav_enter_ms = other.nav_enter_ms;
        self.shuffle_exit_ms = other.shuffle_exit_ms;
        self.shuffle_enter_ms = other.shuffle_enter_ms;
        self.drag_threshold = other.drag_threshold;
    }

    fn section_name(&self) -> &'static str {
        "deck"
    }
}
