//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Website URL could not be interpreted
    #[error("Invalid website: {0}")]
    InvalidWebsite(String),

    /// Unknown email style key
    #[error("Unknown email style: {0}")]
    UnknownEmailStyle(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
