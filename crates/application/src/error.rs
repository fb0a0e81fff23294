//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Credentials missing or rejected
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Writing an export file failed
    #[error("Export failed: {0}")]
    Export(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error must end the run instead of counting as an empty
    /// stage attempt
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::NotAuthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors() {
        assert!(ApplicationError::Configuration("missing key".into()).is_fatal());
        assert!(ApplicationError::NotAuthorized("401".into()).is_fatal());
        assert!(!ApplicationError::Inference("timeout".into()).is_fatal());
        assert!(!ApplicationError::RateLimited.is_fatal());
        assert!(!ApplicationError::Export("disk full".into()).is_fatal());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidWebsite("::".into()).into();
        assert_eq!(err.to_string(), "Invalid website: ::");
    }

    #[test]
    fn export_error_message() {
        let err = ApplicationError::Export("permission denied".into());
        assert_eq!(err.to_string(), "Export failed: permission denied");
    }
}
