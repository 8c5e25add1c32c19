//! Persona service connection settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How to reach the persona service
///
/// `api_key` may be read from the file or the environment but is never
/// written back out.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonaConfig {
    pub base_url: String,
    pub api_version: String,

    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Per-request deadline in seconds (1-120)
    pub timeout_secs: u64,

    /// Attempts per idempotent request, 1 disables retrying
    pub max_attempts: u32,

    /// Consecutive failures before calls are refused locally
    pub failure_threshold: u32,

    /// Seconds to refuse calls before probing again
    pub cooldown_secs: u64,
}

impl PersonaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// The key if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sensay.io/v1".to_string(),
            api_version: "2025-03-25".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_attempts: 3,
            failure_threshold: 5,
            cooldown_secs: 30,
        }
    }
}

impl fmt::Debug for PersonaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonaConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("failure_threshold", &self.failure_threshold)
            .field("cooldown_secs", &self.cooldown_secs)
            .finish()
    }
}

impl ConfigSection for PersonaConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        if !(15..=30).contains(&self.timeout_secs) && (1..=120).contains(&self.timeout_secs) {
            log::debug!(
                "persona.timeout_secs = {} is outside the recommended 15-30",
                self.timeout_secs
            );
        }

        Validator::collect_errors(vec![
            Validator::http_url(&self.base_url, "persona.base_url"),
            Validator::not_empty(&self.api_version, "persona.api_version"),
            Validator::in_range(self.timeout_secs, 1, 120, "persona.timeout_secs"),
            Validator::in_range(self.max_attempts, 1, 10, "persona.max_attempts"),
            Validator::in_range(self.failure_threshold, 1, 100, "persona.failure_threshold"),
            Validator::in_range(self.cooldown_secs, 1, 3600, "persona.cooldown_secs"),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.base_url = other.base_url;
        self.api_version = other.api_version;
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        self.timeout_secs = other.timeout_secs;
        self.max_attempts = other.max_attempts;
        self.failure_threshold = other.failure_threshold;
        self.cooldown_secs = other.cooldown_secs;
    }

    fn section_name(&self) -> &'static str {
        "persona"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PersonaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = PersonaConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.timeout_secs = 121;
        assert!(config.validate().is_err());
        config.timeout_secs = 90;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_base_url() {
        let mut config = PersonaConfig::default();
        config.base_url = "api.sensay.io".to_string();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].field, "persona.base_url");
    }

    #[test]
    fn test_blank_key_is_none() {
        let mut config = PersonaConfig::default();
        config.api_key = Some("   ".to_string());
        assert_eq!(config.api_key(), None);
        config.api_key = Some("secret".to_string());
        assert_eq!(config.api_key(), Some("secret"));
    }

    #[test]
    fn test_key_never_serialized() {
        let mut config = PersonaConfig::default();
        config.api_key = Some("hunter2".to_string());
        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("api_key"));
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_key_read_from_file() {
        let config: PersonaConfig = toml::from_str("api_key = \"from-file\"").unwrap();
        assert_eq!(config.api_key(), Some("from-file"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_merge_keeps_key_when_other_has_none() {
        let mut base = PersonaConfig::default();
        base.api_key = Some("k".to_string());
        let mut other = PersonaConfig::default();
        other.timeout_secs = 20;
        base.merge(other);
        assert_eq!(base.api_key(), Some("k"));
        assert_eq!(base.timeout_secs, 20);
    }
}
