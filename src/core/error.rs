//! Custom error types for replkit
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for replkit operations
#[derive(Error, Debug)]
pub enum ReplError {
    /// Malformed command or runner configuration, detected during setup
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflicting registrations or unresolvable alias expansions
    #[error("configuration error: {0}")]
    Config(String),

    /// An error raised by a command handler with no local error handler
    #[error("{0}")]
    Handler(anyhow::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line editor errors
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Convenience Result type for replkit operations
pub type Result<T> = std::result::Result<T, ReplError>;

impl ReplError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short taxonomy name, used by the loop's caught-error banner
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Config(_) => "ConfigError",
            Self::Handler(_) => "HandlerError",
            Self::Io(_) => "IoError",
            Self::Readline(_) => "ReadlineError",
        }
    }
}

impl From<anyhow::Error> for ReplError {
    fn from(err: anyhow::Error) -> Self {
        Self::Handler(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ReplError::validation("x").kind(), "ValidationError");
        assert_eq!(ReplError::config("x").kind(), "ConfigError");
        assert_eq!(
            ReplError::from(anyhow::anyhow!("boom")).kind(),
            "HandlerError"
        );
    }

    #[test]
    fn test_handler_error_displays_inner_message() {
        let err = ReplError::from(anyhow::anyhow!("division by zero"));
        assert_eq!(err.to_string(), "division by zero");
    }
}
