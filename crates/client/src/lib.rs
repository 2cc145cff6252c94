//! Rust client for the Scrappey web-scraping API.
//!
//! Every operation serializes a configuration into one JSON POST against
//! the vendor endpoint and reshapes the reply into a
//! [`NormalizedResponse`]. Antibot handling, captcha solving, and
//! browser automation all happen on the vendor side; this crate only
//! describes what to do and reads back the result.
//!
//! # Example
//!
//! ```no_run
//! use scrappey::{RequestConfig, client_from_env};
//!
//! # async fn run() -> Result<(), scrappey::ClientError> {
//! let client = client_from_env()?;
//! let mut response = client
//!     .get(RequestConfig::get("https://httpbin.rs/get"))
//!     .await?;
//! println!("{} {}", response.status, response.status_text);
//! println!("{}", response.text()?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub use scrappey_application::{
    ClientConfig, ClientError, ClientResult, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MappedRequest,
    ScrappeyClient, Transport, TransportError, TransportReply, TransportRequest, map_config,
    normalize,
};
pub use scrappey_domain::{
    ActionPhase, BrowserAction, BrowserActionKind, CaptchaKind, Command, Cookie, CookieInput,
    DomainError, Envelope, EnvelopeStatus, Header, Headers, HttpMethod, NormalizedResponse, Proxy,
    ProxyServer, QueryParam, QueryParams, RequestBody, RequestConfig, ResponseError, ResponseKind,
    SessionCreated, SessionList, SessionOptions, SessionStatus, Solution, VendorExtensions,
    VendorMeta, VendorOptions, WebSocketOptions, generate_session_id,
};
pub use scrappey_infrastructure::ReqwestTransport;

/// The default client type: the core wired to the reqwest transport.
pub type Scrappey = ScrappeyClient<ReqwestTransport>;

/// Creates a client for the given API key with default settings.
///
/// # Errors
///
/// Returns a [`ClientError::Transport`] when the HTTP client cannot be
/// constructed.
pub fn client(api_key: impl Into<String>) -> ClientResult<Scrappey> {
    client_with_config(ClientConfig::new(api_key))
}

/// Creates a client from the `SCRAPPEY_*` environment variables.
///
/// # Errors
///
/// Returns [`ClientError::MissingApiKey`] when `SCRAPPEY_API_KEY` is
/// unset or empty, or a [`ClientError::Transport`] when the HTTP client
/// cannot be constructed.
pub fn client_from_env() -> ClientResult<Scrappey> {
    client_with_config(ClientConfig::from_env()?)
}

/// Creates a client from an explicit configuration.
///
/// # Errors
///
/// Returns a [`ClientError::Transport`] when the HTTP client cannot be
/// constructed.
pub fn client_with_config(config: ClientConfig) -> ClientResult<Scrappey> {
    let transport = ReqwestTransport::new()?;
    Ok(ScrappeyClient::new(config, Arc::new(transport)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        assert!(client("key").is_ok());
    }

    #[test]
    fn test_config_is_preserved() {
        let built = client_with_config(
            ClientConfig::new("key").with_base_url("https://other.example/api"),
        );
        #[allow(clippy::unwrap_used)]
        let built = built.unwrap();
        assert_eq!(built.config().base_url(), "https://other.example/api");
    }
}
