//! Cosmetic decoration attached to generated cards
//!
//! Nothing in here is measured. Engagement numbers are synthesized filler for
//! the feed and must never be read as telemetry.

use crate::types::content::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three stop color gradient used as a card background
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub from: String,
    pub via: String,
    pub to: String,
}

impl ColorTheme {
    pub fn new(from: &str, via: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            via: via.to_string(),
            to: to.to_string(),
        }
    }

    /// Theme used when a card's expert has no palette of its own
    pub fn neutral() -> Self {
        Self::new("gray-600", "gray-700", "gray-800")
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} -> {}", self.from, self.via, self.to)
    }
}

/// Background texture drawn behind card text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    #[default]
    Dots,
    Waves,
    Geometric,
    Particles,
}

/// Idle animation applied to the card icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStyle {
    #[default]
    Float,
    Pulse,
    Rotate,
    Bounce,
}

impl AnimationStyle {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self::Bounce,
            Difficulty::Intermediate => Self::Float,
            Difficulty::Advanced => Self::Pulse,
        }
    }
}

/// Synthetic social counters shown on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngagementStats {
    pub views: u32,
    pub likes: u32,
    pub saves: u32,
    pub discussions: u32,
}

impl EngagementStats {
    /// Views in feed shorthand, e.g. `1.2M` or `847K`
    pub fn formatted_views(&self) -> String {
        format_count(self.views)
    }
}

/// Formats a count the way the feed displays it
pub fn format_count(n: u32) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Everything a renderer needs to dress a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub theme: ColorTheme,
    pub icon: String,
    pub pattern: BackgroundPattern,
    pub animation: AnimationStyle,
    pub stats: EngagementStats,
    pub reading_minutes: u32,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            theme: ColorTheme::neutral(),
            icon: "🤖".to_string(),
            pattern: BackgroundPattern::default(),
            animation: AnimationStyle::default(),
            stats: EngagementStats::default(),
            reading_minutes: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1_234_567), "1.2M");
        assert_eq!(format_count(847_300), "847K");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1K");
    }

    #[test]
    fn test_animation_by_difficulty() {
        assert_eq!(
            AnimationStyle::for_difficulty(Difficulty::Beginner),
            AnimationStyle::Bounce
        );
        assert_eq!(
            AnimationStyle::for_difficulty(Difficulty::Intermediate),
            AnimationStyle::Float
        );
        assert_eq!(
            AnimationStyle::for_difficulty(Difficulty::Advanced),
            AnimationStyle::Pulse
        );
    }

    #[test]
    fn test_theme_display() {
        let theme = ColorTheme::new("purple-600", "blue-600", "indigo-600");
        assert_eq!(theme.to_string(), "purple-600 -> blue-600 -> indigo-600");
    }
}
