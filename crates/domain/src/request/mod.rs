//! Request configuration
//!
//! [`RequestConfig`] is the ecosystem-shaped description of a scrape call.
//! It is built once per call, is immutable after construction, and is
//! translated into the vendor option bag by the application layer.

mod body;
mod header;
mod method;
mod query;

pub use body::RequestBody;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cookie::CookieInput;
use crate::error::DomainResult;
use crate::options::VendorExtensions;
use crate::proxy::Proxy;

/// How the caller wants the response body interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// The rendered page HTML, as the vendor returns it.
    #[default]
    Html,
    /// Extracted page text, JSON-parsed when possible. Requests text
    /// extraction from the vendor.
    Json,
}

/// Complete configuration for one scrape call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Target URL to scrape.
    pub url: String,
    /// HTTP method the vendor should use against the target.
    #[serde(default)]
    pub method: HttpMethod,
    /// Headers forwarded to the target site.
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters appended to the URL before mapping.
    #[serde(default)]
    pub params: QueryParams,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Per-call timeout; also forwarded to the vendor in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    /// Proxy for the vendor to scrape through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
    /// Cookies to set before scraping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<CookieInput>,
    /// Response body interpretation.
    #[serde(default)]
    pub response_kind: ResponseKind,
    /// Vendor passthrough options.
    #[serde(default)]
    pub vendor: VendorExtensions,
}

impl RequestConfig {
    /// Creates a GET configuration for the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Get, url)
    }

    /// Creates a POST configuration for the given URL.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Post, url)
    }

    /// Creates a PUT configuration for the given URL.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Put, url)
    }

    /// Creates a DELETE configuration for the given URL.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Delete, url)
    }

    /// Creates a PATCH configuration for the given URL.
    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Patch, url)
    }

    /// Creates a configuration with an explicit method.
    #[must_use]
    pub fn with_method(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            ..Self::default()
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the proxy.
    #[must_use]
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the cookies.
    #[must_use]
    pub fn cookies(mut self, cookies: CookieInput) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Requests text extraction and JSON interpretation of the body.
    #[must_use]
    pub const fn expect_json(mut self) -> Self {
        self.response_kind = ResponseKind::Json;
        self
    }

    /// Replaces the vendor passthrough options.
    #[must_use]
    pub fn vendor(mut self, vendor: VendorExtensions) -> Self {
        self.vendor = vendor;
        self
    }

    /// Returns the target URL with query parameters applied.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::InvalidUrl`] when parameters are
    /// present and the URL does not parse.
    pub fn resolved_url(&self) -> DomainResult<String> {
        self.params.append_to(&self.url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_constructors() {
        assert_eq!(RequestConfig::get("https://a").method, HttpMethod::Get);
        assert_eq!(RequestConfig::post("https://a").method, HttpMethod::Post);
        assert_eq!(RequestConfig::patch("https://a").method, HttpMethod::Patch);
    }

    #[test]
    fn test_builder_chain() {
        let config = RequestConfig::post("https://example.com/login")
            .header("content-type", "application/json")
            .body(RequestBody::text("{}"))
            .timeout(Duration::from_secs(30))
            .expect_json();

        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.response_kind, ResponseKind::Json);
    }

    #[test]
    fn test_resolved_url_applies_params() {
        let config = RequestConfig::get("https://example.com/search").param("q", "rust");
        assert_eq!(
            config.resolved_url().unwrap(),
            "https://example.com/search?q=rust"
        );
    }
}
