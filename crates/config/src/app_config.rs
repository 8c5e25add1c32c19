//! Application-level configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User id the CLI acts as unless told otherwise
pub const DEFAULT_USER_ID: &str = "mentorscroll_main_user";

/// Log level for application logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Color scheme options for the terminal browser
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Auto,
    Light,
    Dark,
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorScheme::Auto => write!(f, "auto"),
            ColorScheme::Light => write!(f, "light"),
            ColorScheme::Dark => write!(f, "dark"),
        }
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,

    /// Persona service user the CLI acts for
    pub user_id: String,

    pub color_scheme: ColorScheme,

    /// Print full error chains instead of the short user message
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            user_id: DEFAULT_USER_ID.to_string(),
            color_scheme: ColorScheme::Auto,
            debug_mode: false,
        }
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![Validator::not_empty(&self.user_id, "app.user_id")];

        if self.user_id.chars().any(char::is_whitespace) {
            results.push(Err(ValidationError::with_value(
                "app.user_id",
                "must not contain whitespace",
                &self.user_id,
            )));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.log_level = other.log_level;
        self.user_id = other.user_id;
        self.color_scheme = other.color_scheme;
        self.debug_mode = other.debug_mode;
    }

    fn section_name(&self) -> &'static str {
        "app"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.user_id, "mentorscroll_main_user");
    }

    #[test]
    fn test_user_id_rules() {
        let mut config = AppConfig::default();
        config.user_id = "  ".to_string();
        assert!(config.validate().is_err());

        config.user_id = "two words".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge() {
        let mut base = AppConfig::default();
        let mut other = AppConfig::default();
        other.log_level = LogLevel::Debug;
        other.debug_mode = true;
        other.user_id = "demo".to_string();

        base.merge(other);
        assert_eq!(base.log_level, LogLevel::Debug);
        assert!(base.debug_mode);
        assert_eq!(base.user_id, "demo");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_color_scheme_display() {
        assert_eq!(ColorScheme::Auto.to_string(), "auto");
        assert_eq!(ColorScheme::Dark.to_string(), "dark");
    }
}
