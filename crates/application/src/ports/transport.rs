//! HTTP transport port

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One outbound POST to the vendor endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Fully qualified endpoint URL, API key already applied.
    pub url: String,
    /// JSON payload, `cmd` already merged in.
    pub body: Value,
    /// How long the transport may wait for the reply.
    pub timeout: Duration,
}

/// The raw reply from the vendor endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    /// HTTP status of the vendor endpoint itself (not the scraped page).
    pub status: u16,
    /// Reply body text.
    pub body: String,
}

/// Transport-level failures: the call never produced a vendor reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The call exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The endpoint host could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error text.
        message: String,
    },

    /// The endpoint refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Host that refused.
        host: String,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The endpoint URL is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for delivering one JSON POST to the vendor endpoint.
///
/// Implementations own connection handling and timeout enforcement; they
/// must not interpret the reply body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the POST and returns the raw reply.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no reply was obtained (network
    /// failure, timeout, bad endpoint URL).
    async fn execute(&self, request: TransportRequest) -> Result<TransportReply, TransportError>;
}
