//! Error types and recovery strategies for MentorScroll
//!
//! Errors are sorted into three severity tiers:
//! - **Recoverable**: can be retried (persona service timeout, rate limit)
//! - **Degraded**: a feature is unavailable but the feed keeps working
//! - **Fatal**: needs user intervention (missing credentials, corrupt config)
//!
//! Every error also carries a recovery action and a short message that is safe
//! to show inline in the UI.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Recovery actions that can be taken when an error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Retry the operation immediately
    RetryImmediate,
    /// Retry after backing off
    RetryWithBackoff,
    /// Hide the failing feature and continue
    DisableFeature,
    /// Fall back to default settings
    ResetToDefaults,
    /// No automatic recovery
    UserIntervention,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RetryImmediate => write!(f, "Retrying immediately"),
            Self::RetryWithBackoff => write!(f, "Retrying with backoff"),
            Self::DisableFeature => write!(f, "Disabling feature"),
            Self::ResetToDefaults => write!(f, "Resetting to defaults"),
            Self::UserIntervention => write!(f, "User intervention required"),
        }
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Recoverable,
    Degraded,
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for MentorScroll
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Persona service =====
    /// The persona service could not be reached
    #[error("Persona service unavailable: {message}")]
    PersonaUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A persona call did not finish in time
    #[error("Persona service timeout after {seconds}s: {operation}")]
    PersonaTimeout { operation: String, seconds: u64 },

    /// The persona service asked us to slow down
    #[error("Persona service rate limited")]
    RateLimited,

    /// The persona service answered with an error status
    #[error("Persona service rejected request ({status}): {message}")]
    PersonaRejected { status: u16, message: String },

    /// No persona exists for an expert
    #[error("Expert not found: {slug}")]
    ExpertNotFound { slug: String },

    /// Response body could not be understood
    #[error("Invalid response from persona service: {details}")]
    InvalidResponse { details: String },

    /// Credentials were not supplied
    #[error("Missing credential: {name}")]
    MissingCredential { name: String },

    // ===== Configuration =====
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },

    #[error("Configuration corrupted: {path}")]
    ConfigurationCorrupted { path: PathBuf },

    // ===== File system =====
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    // ===== Generic =====
    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Operation cancelled: {operation}")]
    Cancelled { operation: String },

    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PersonaUnavailable { .. }
            | Self::PersonaTimeout { .. }
            | Self::RateLimited => ErrorSeverity::Recoverable,

            Self::PersonaRejected { .. }
            | Self::ExpertNotFound { .. }
            | Self::InvalidResponse { .. }
            | Self::Cancelled { .. } => ErrorSeverity::Degraded,

            Self::MissingCredential { .. } | Self::ConfigurationCorrupted { .. } => {
                ErrorSeverity::Fatal
            }

            _ => ErrorSeverity::Degraded,
        }
    }

    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::PersonaTimeout { .. } => RecoveryAction::RetryImmediate,

            Self::PersonaUnavailable { .. } | Self::RateLimited => {
                RecoveryAction::RetryWithBackoff
            }

            // 5xx answers are worth another attempt, 4xx are not
            Self::PersonaRejected { status, .. } if *status >= 500 => {
                RecoveryAction::RetryWithBackoff
            }

            Self::ExpertNotFound { .. } | Self::InvalidResponse { .. } => {
                RecoveryAction::DisableFeature
            }

            Self::ConfigurationCorrupted { .. } | Self::InvalidConfiguration { .. } => {
                RecoveryAction::ResetToDefaults
            }

            _ => RecoveryAction::UserIntervention,
        }
    }

    /// Returns a short message suitable for an inline error bubble
    pub fn user_message(&self) -> String {
        match self {
            Self::PersonaUnavailable { .. }
            | Self::PersonaTimeout { .. }
            | Self::PersonaRejected { .. }
            | Self::InvalidResponse { .. } => {
                "Sorry, I had trouble responding. Please try again.".to_string()
            }
            Self::RateLimited => {
                "Our experts are busy right now. Please try again in a moment.".to_string()
            }
            Self::ExpertNotFound { slug } => {
                format!("Expert '{}' is not available yet. Run setup first.", slug)
            }
            Self::MissingCredential { name } => {
                format!("{} is not configured. Set it and try again.", name)
            }
            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
            Self::ConfigurationCorrupted { .. } => {
                "Settings are corrupted. Resetting to defaults...".to_string()
            }
            Self::FileNotFound { .. } => {
                "The file was not found. It may have been moved or deleted.".to_string()
            }
            Self::IoError { .. } => "A file operation failed. Please try again.".to_string(),
            Self::InternalError { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
            Self::Cancelled { .. } => "Operation was cancelled.".to_string(),
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self.recovery_action(),
            RecoveryAction::RetryImmediate | RecoveryAction::RetryWithBackoff
        )
    }

    /// Helper to wrap a transport error from any source
    pub fn unavailable<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::PersonaUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound {
                path: PathBuf::from("unknown"),
            },
            _ => Self::IoError {
                message: err.to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_action_display() {
        assert_eq!(
            RecoveryAction::RetryImmediate.to_string(),
            "Retrying immediately"
        );
        assert_eq!(
            RecoveryAction::ResetToDefaults.to_string(),
            "Resetting to defaults"
        );
        assert_eq!(
            RecoveryAction::UserIntervention.to_string(),
            "User intervention required"
        );
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Degraded);
        assert!(ErrorSeverity::Degraded < ErrorSeverity::Fatal);
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err = AppError::PersonaTimeout {
            operation: "chat".to_string(),
            seconds: 30,
        };
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(err.recovery_action(), RecoveryAction::RetryImmediate);
        assert!(err.is_retryable());
        assert!(!err.is_critical());
    }

    #[test]
    fn test_rejected_status_decides_retry() {
        let server = AppError::PersonaRejected {
            status: 503,
            message: "down".to_string(),
        };
        let client = AppError::PersonaRejected {
            status: 400,
            message: "bad".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = AppError::MissingCredential {
            name: "MENTORSCROLL_PERSONA_API_KEY".to_string(),
        };
        assert!(err.is_critical());
        assert!(err.user_message().contains("MENTORSCROLL_PERSONA_API_KEY"));
    }

    #[test]
    fn test_user_messages_hide_details() {
        let err = AppError::PersonaRejected {
            status: 500,
            message: "stack trace at line 42".to_string(),
        };
        let msg = err.user_message();
        assert!(!msg.contains("stack trace"));
        assert!(msg.contains("try again"));
    }

    #[test]
    fn test_unavailable_helper_keeps_source() {
        use std::error::Error;

        let inner = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::unavailable("connect failed", inner);
        assert!(matches!(err, AppError::PersonaUnavailable { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let not_found: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(not_found, AppError::FileNotFound { .. }));

        let other: AppError = io::Error::other("boom").into();
        assert!(matches!(other, AppError::IoError { .. }));
    }
}
