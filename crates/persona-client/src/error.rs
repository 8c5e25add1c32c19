// crates/persona-client/src/error.rs
//! Error types for persona service calls

use mentorscroll_core::AppError;
use mentorscroll_resilience::ResilienceError;
use std::time::Duration;
use thiserror::Error;

/// Result type for persona service calls
pub type PersonaResult<T> = Result<T, PersonaError>;

#[derive(Debug, Error)]
pub enum PersonaError {
    /// Transport failure before any response arrived
    #[error("Connection to persona service failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// The call did not finish before the deadline
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// HTTP 429
    #[error("Persona service rate limited the request")]
    RateLimited,

    /// HTTP 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx answer
    #[error("Persona service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx answer whose body was unusable or reported failure
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Calls are being refused locally after repeated failures
    #[error("Persona service unavailable: {0}")]
    CircuitOpen(ResilienceError),

    /// No API key was configured
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl PersonaError {
    /// True for failures a later attempt may not hit
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout { .. } | Self::RateLimited => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// True if the failure says something about the health of the service
    pub fn counts_against_service(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
            || matches!(self, Self::Status { status, .. } if *status >= 500)
    }

    /// Short message for an inline error bubble
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited => "Our experts are busy right now. Please try again in a moment.",
            Self::MissingCredential(_) => {
                "The persona service is not configured. Set an API key and try again."
            }
            _ => "Sorry, I had trouble responding. Please try again.",
        }
    }
}

impl From<PersonaError> for AppError {
    fn from(err: PersonaError) -> Self {
        match err {
            PersonaError::Connection(e) => AppError::unavailable("connection failed", e),
            PersonaError::CircuitOpen(e) => AppError::unavailable("too many recent failures", e),
            PersonaError::Timeout { operation, timeout } => AppError::PersonaTimeout {
                operation: operation.to_string(),
                seconds: timeout.as_secs(),
            },
            PersonaError::RateLimited => AppError::RateLimited,
            PersonaError::NotFound(what) => AppError::ExpertNotFound { slug: what },
            PersonaError::Status { status, message } => {
                AppError::PersonaRejected { status, message }
            }
            PersonaError::InvalidResponse(details) => AppError::InvalidResponse { details },
            PersonaError::MissingCredential(name) => AppError::MissingCredential {
                name: name.to_string(),
            },
            PersonaError::InvalidRequest(reason) => AppError::InvalidArgument {
                argument: "request".to_string(),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(PersonaError::RateLimited.is_retryable());
        assert!(PersonaError::Timeout {
            operation: "chat",
            timeout: Duration::from_secs(30)
        }
        .is_retryable());
        assert!(PersonaError::Status {
            status: 503,
            message: "down".into()
        }
        .is_retryable());
        assert!(!PersonaError::Status {
            status: 400,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!PersonaError::NotFound("x".into()).is_retryable());
        assert!(!PersonaError::MissingCredential("api key").is_retryable());
    }

    #[test]
    fn test_rate_limit_does_not_trip_breaker() {
        assert!(!PersonaError::RateLimited.counts_against_service());
        assert!(PersonaError::Status {
            status: 500,
            message: String::new()
        }
        .counts_against_service());
    }

    #[test]
    fn test_user_message() {
        let err = PersonaError::Timeout {
            operation: "chat",
            timeout: Duration::from_secs(30),
        };
        assert_eq!(
            err.user_message(),
            "Sorry, I had trouble responding. Please try again."
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = PersonaError::Timeout {
            operation: "chat",
            timeout: Duration::from_secs(30),
        }
        .into();
        assert!(matches!(app, AppError::PersonaTimeout { seconds: 30, .. }));
        assert!(app.is_retryable());

        let app: AppError = PersonaError::MissingCredential("MENTORSCROLL_PERSONA_API_KEY").into();
        assert!(app.is_critical());
    }
}
