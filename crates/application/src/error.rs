//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Text generation error
    #[error("Generation error: {0}")]
    Generation(String),

    /// Speech recognition error
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// Speech synthesis error
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Session not found
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::RateLimited | ApplicationError::Generation(_)
        )
    }
}
