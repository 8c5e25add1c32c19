//! Error types for the configuration system

use mentorscroll_core::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// One or more fields hold values outside their allowed range
    #[error("Config validation failed: {}", join_errors(.0))]
    ValidationError(Vec<ValidationError>),

    /// An environment override could not be parsed
    #[error("Invalid value '{value}' in {variable}: {reason}")]
    InvalidOverride {
        variable: String,
        value: String,
        reason: String,
    },

    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine config directory path: {reason}")]
    PathResolutionError { reason: String },

    #[error("Failed to backup config file: {source}")]
    BackupError { source: std::io::Error },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ParseError { path, .. } => AppError::ConfigurationCorrupted { path },
            ConfigError::ReadError { path, source }
                if source.kind() == std::io::ErrorKind::InvalidData =>
            {
                AppError::ConfigurationCorrupted { path }
            }
            ConfigError::ValidationError(errors) => {
                let first = errors.first();
                AppError::InvalidConfiguration {
                    setting: first.map_or_else(String::new, |e| e.field.clone()),
                    value: first.and_then(|e| e.value.clone()).unwrap_or_default(),
                    reason: join_errors(&errors),
                }
            }
            ConfigError::InvalidOverride {
                variable,
                value,
                reason,
            } => AppError::InvalidConfiguration {
                setting: variable,
                value,
                reason,
            },
            other => AppError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "persona.timeout_secs")
    pub field: String,
    pub message: String,
    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("persona.base_url", "must not be empty");
        assert_eq!(err.to_string(), "Field 'persona.base_url': must not be empty");
    }

    #[test]
    fn test_validation_error_with_value() {
        let err =
            ValidationError::with_value("persona.timeout_secs", "must be between 1 and 120", 300);
        assert_eq!(
            err.to_string(),
            "Field 'persona.timeout_secs': must be between 1 and 120 (got: 300)"
        );
    }

    #[test]
    fn test_validation_failure_converts_to_app_error() {
        let err = ConfigError::ValidationError(vec![ValidationError::with_value(
            "deck.drag_threshold",
            "must be between 1 and 1000",
            0,
        )]);
        let app: AppError = err.into();
        assert!(matches!(
            app,
            AppError::InvalidConfiguration { setting, value, .. }
                if setting == "deck.drag_threshold" && value == "0"
        ));
    }
}
