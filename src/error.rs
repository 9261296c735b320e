// Error types for repolens.
// Covers GitHub API errors, relay/summarization errors, storage and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// True when the upstream answered that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// True when the upstream answered with a non-success status.
    /// Transport and decoding failures are not status failures.
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::Unauthorized
                | AppError::RateLimited { .. }
                | AppError::Http { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(AppError::NotFound("x".into()).is_not_found());
        assert!(AppError::NotFound("x".into()).is_status());
        assert!(
            AppError::Http {
                status: 500,
                message: String::new()
            }
            .is_status()
        );
        assert!(!AppError::Other("boom".into()).is_status());
        assert!(!AppError::Unauthorized.is_not_found());
    }
}
