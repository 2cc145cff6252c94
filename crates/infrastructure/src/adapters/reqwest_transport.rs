//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port with a shared
//! `reqwest::Client`. It delivers the JSON POST, enforces the per-call
//! timeout, and maps reqwest failures onto the port's error shape.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use scrappey_application::ports::{Transport, TransportError, TransportReply, TransportRequest};

/// Transport implementation backed by reqwest.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// The underlying client identifies itself with this crate's name and
    /// version and otherwise keeps reqwest's defaults; per-call timeouts
    /// come from the request, not the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("scrappey-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport around a caller-provided reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Maps reqwest errors to the port's `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            let message = error.to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return TransportError::Dns { host, message };
            }
            if lowered.contains("refused") {
                return TransportError::ConnectionRefused { host };
            }
            return TransportError::ConnectionFailed(message);
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportReply, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = request.timeout.as_millis() as u64;

        let response = self
            .client
            .post(url)
            .timeout(request.timeout)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        debug!(status, "vendor endpoint answered");

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read reply body: {e}")))?;

        Ok(TransportReply { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_endpoint_url_fails_before_sending() {
        let transport = ReqwestTransport::new().unwrap();
        let result = transport
            .execute(TransportRequest {
                url: "not a url".to_string(),
                body: json!({"cmd": "request.get"}),
                timeout: Duration::from_secs(1),
            })
            .await;
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }
}
