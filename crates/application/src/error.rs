//! Client error types

use thiserror::Error;

use scrappey_domain::{DomainError, NormalizedResponse, ResponseError};

use crate::ports::TransportError;

/// Errors surfaced by client operations.
///
/// Validation errors (`MissingApiKey`, `MissingUrl`, and the domain
/// errors) are raised before any I/O; the rest come out of the call's
/// failure path. Nothing is retried; every error is scoped to one call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No API key is configured.
    #[error("API key is required")]
    MissingApiKey,

    /// The request configuration has no URL.
    #[error("request URL is required")]
    MissingUrl,

    /// A domain validation or mapping error.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The call never reached the vendor.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The vendor endpoint itself answered non-2xx (distinct from the
    /// scraped page's status).
    #[error("vendor endpoint returned HTTP {status}")]
    Http {
        /// HTTP status of the vendor endpoint.
        status: u16,
        /// Raw reply body, kept for inspection.
        body: String,
    },

    /// The vendor processed the call and reported failure.
    #[error("vendor reported failure: {message}")]
    Api {
        /// The vendor's error message.
        message: String,
        /// The normalized response built from the failing envelope, when
        /// one could be constructed.
        response: Option<Box<NormalizedResponse>>,
    },

    /// The vendor reply was not the expected JSON shape.
    #[error("malformed vendor reply: {0}")]
    MalformedReply(String),

    /// The request payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A response body accessor failed.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
