// crates/tui/src/error.rs
//! Error types for the deck browser

use thiserror::Error;

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal too small or not interactive
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Nothing to browse: {0}")]
    EmptyDeck(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TuiError::Terminal("not a tty".to_string());
        assert!(err.to_string().contains("Terminal error"));

        let err = TuiError::EmptyDeck("no cards were generated".to_string());
        assert_eq!(err.to_string(), "Nothing to browse: no cards were generated");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }
}
