// crates/generator/src/error.rs
//! Error types for content generation

use mentorscroll_core::{AppError, ExpertSlug};
use mentorscroll_persona_client::PersonaError;
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Persona(#[from] PersonaError),

    /// The slug is not in the expert catalog
    #[error("Unknown expert: {0}")]
    UnknownExpert(String),

    /// The expert exists but no persona has been created for it yet
    #[error("No persona provisioned for {0}")]
    NotProvisioned(ExpertSlug),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The outline reply contained no usable episodes
    #[error("Series outline for '{0}' had no episodes")]
    EmptySeries(String),
}

impl GeneratorError {
    /// Text suitable for showing inline in the UI
    pub fn user_message(&self) -> String {
        match self {
            Self::Persona(e) => e.user_message().to_string(),
            Self::UnknownExpert(slug) => format!("There is no expert called '{}'.", slug),
            Self::NotProvisioned(slug) => format!(
                "{} has not been set up yet. Run setup-experts first.",
                slug
            ),
            Self::InvalidRequest(reason) => reason.clone(),
            Self::EmptySeries(_) => {
                "The expert could not plan that series. Try another subject.".to_string()
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persona(e) if e.is_retryable())
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Persona(e) => e.into(),
            GeneratorError::UnknownExpert(slug) => AppError::ExpertNotFound { slug },
            GeneratorError::NotProvisioned(slug) => AppError::ExpertNotFound {
                slug: slug.to_string(),
            },
            GeneratorError::InvalidRequest(reason) => AppError::InvalidArgument {
                argument: "request".to_string(),
                reason,
            },
            GeneratorError::EmptySeries(subject) => AppError::InvalidResponse {
                details: format!("series outline for '{}' had no episodes", subject),
            },
        }
    }
}
