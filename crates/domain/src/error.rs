//! Domain error types

use thiserror::Error;

/// Domain-level errors raised during validation or mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method has no vendor command equivalent.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The command string is not one the vendor recognizes.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The request body could not be encoded for the wire.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
