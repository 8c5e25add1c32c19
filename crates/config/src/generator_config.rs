//! Content generation settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

const DIFFICULTIES: [&str; 3] = ["beginner", "intermediate", "advanced"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Pause between expert calls when collecting perspectives
    pub perspective_delay_ms: u64,
    pub trending_delay_ms: u64,
    pub series_delay_ms: u64,
    /// Pause between persona creations in `setup-experts`
    pub provision_delay_ms: u64,
    pub max_perspectives: usize,
    pub trending_count: usize,
    pub series_episodes: u32,
    pub default_difficulty: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            perspective_delay_ms: 500,
            trending_delay_ms: 200,
            series_delay_ms: 500,
            provision_delay_ms: 2000,
            max_perspectives: 3,
            trending_count: 10,
            series_episodes: 5,
            default_difficulty: "beginner".to_string(),
        }
    }
}

impl ConfigSection for GeneratorConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::in_range(
                self.perspective_delay_ms,
                0,
                60_000,
                "generator.perspective_delay_ms",
            ),
            Validator::in_range(self.trending_delay_ms, 0, 60_000, "generator.trending_delay_ms"),
            Validator::in_range(self.series_delay_ms, 0, 60_000, "generator.series_delay_ms"),
            Validator::in_range(self.provision_delay_ms, 0, 60_000, "generator.provision_delay_ms"),
            Validator::in_range(self.max_perspectives, 1, 5, "generator.max_perspectives"),
            Validator::in_range(self.trending_count, 1, 50, "generator.trending_count"),
            Validator::in_range(self.series_episodes, 1, 10, "generator.series_episodes"),
            Validator::one_of(
                &self.default_difficulty.as_str(),
                &DIFFICULTIES,
                "generator.default_difficulty",
            ),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.perspective_delay_ms = other.perspective_delay_ms;
        self.trending_delay_ms = other.trending_delay_ms;
        self.series_delay_ms = other.series_delay_ms;
        self.provision_delay_ms = other.provision_delay_ms;
        self.max_perspectives = other.max_perspectives;
        self.trending_count = other.trending_count;
        self.series_episodes = other.series_episodes;
        self.default_difficulty = other.default_difficulty;
    }

    fn section_name(&self) -> &'static str {
        "generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_difficulty() {
        let mut config = GeneratorConfig::default();
        config.default_difficulty = "expert".to_string();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].field, "generator.default_difficulty");
        assert!(errors[0].message.contains("beginner, intermediate, advanced"));
    }

    #[test]
    fn test_perspective_limit() {
        let mut config = GeneratorConfig::default();
        config.max_perspectives = 0;
        assert!(config.validate().is_err());
        config.max_perspectives = 6;
        assert!(config.validate().is_err());
    }
}
