//! Normalized response
//!
//! [`NormalizedResponse`] is the ecosystem-shaped view of a vendor reply:
//! status, lower-cased headers, a body, and the vendor metadata that has
//! no HTTP equivalent. The body follows a single-use read contract;
//! `peek_*` accessors exist for callers that want idempotent inspection.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::cookie::Cookie;

/// Errors raised by response body accessors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// A consuming accessor was called on an already-consumed body.
    #[error("body already consumed")]
    BodyAlreadyConsumed,
    /// The body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Derives a status text from an optional status code.
///
/// Codes outside the fixed table render as `Status <code>`; an absent
/// code renders as `Unknown`.
#[must_use]
pub fn status_text(code: Option<u16>) -> String {
    match code {
        Some(200) => "OK".to_string(),
        Some(404) => "Not Found".to_string(),
        Some(500) => "Internal Server Error".to_string(),
        Some(other) => format!("Status {other}"),
        None => "Unknown".to_string(),
    }
}

/// Vendor metadata attached to every normalized response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorMeta {
    /// Whether the request verified and consumed balance.
    pub verified: bool,
    /// Final URL after redirects.
    pub current_url: Option<String>,
    /// User agent the vendor browser presented.
    pub user_agent: Option<String>,
    /// Cookies collected during the scrape.
    pub cookies: Vec<Cookie>,
    /// Cookies as a single header string.
    pub cookie_string: Option<String>,
    /// Vendor-side elapsed time in milliseconds.
    pub time_elapsed: Option<u64>,
    /// Session id the call ran under.
    pub session: Option<String>,
    /// Exit-node IP information.
    pub ip_info: Option<Value>,
}

#[derive(Debug, Clone, Default)]
struct BodyState {
    raw: String,
    json: Option<Value>,
    consumed: bool,
}

/// An ecosystem-shaped response built once from a vendor envelope.
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    /// HTTP status of the scraped page (200 when the vendor omits it).
    pub status: u16,
    /// Status text derived from the status code.
    pub status_text: String,
    /// Response headers with lower-cased names.
    pub headers: BTreeMap<String, String>,
    /// Final URL of the response.
    pub url: String,
    /// Whether the final URL differs from the requested one.
    pub redirected: bool,
    /// Vendor metadata with no HTTP equivalent.
    pub meta: VendorMeta,
    body: BodyState,
}

impl NormalizedResponse {
    /// Creates a response with an empty body and default metadata.
    #[must_use]
    pub fn new(status: u16, headers: BTreeMap<String, String>, url: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text(Some(status)),
            headers,
            url: url.into(),
            redirected: false,
            meta: VendorMeta::default(),
            body: BodyState::default(),
        }
    }

    /// Attaches the body: the raw text plus its JSON form when it parsed.
    #[must_use]
    pub fn with_body(mut self, raw: impl Into<String>, json: Option<Value>) -> Self {
        self.body = BodyState {
            raw: raw.into(),
            json,
            consumed: false,
        };
        self
    }

    /// Attaches vendor metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: VendorMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Marks the response as redirected.
    #[must_use]
    pub const fn with_redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the `content-type` header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    /// Looks up a header by name (stored lower-cased).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns whether a consuming accessor has already run.
    #[must_use]
    pub const fn body_consumed(&self) -> bool {
        self.body.consumed
    }

    /// The raw body text, without consuming it.
    #[must_use]
    pub fn peek_text(&self) -> &str {
        &self.body.raw
    }

    /// The parsed JSON body, without consuming it.
    ///
    /// `None` when the body did not parse as JSON at normalization time.
    #[must_use]
    pub const fn peek_json(&self) -> Option<&Value> {
        self.body.json.as_ref()
    }

    /// Consumes the body and returns it as text.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::BodyAlreadyConsumed`] on a second read.
    pub fn text(&mut self) -> Result<String, ResponseError> {
        self.consume()?;
        Ok(self.body.raw.clone())
    }

    /// Consumes the body and returns it as parsed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::BodyAlreadyConsumed`] on a second read,
    /// or [`ResponseError::InvalidJson`] when the body is not JSON. The
    /// body counts as consumed even when parsing fails.
    pub fn json(&mut self) -> Result<Value, ResponseError> {
        self.consume()?;
        if let Some(value) = &self.body.json {
            return Ok(value.clone());
        }
        Ok(serde_json::from_str(&self.body.raw)?)
    }

    /// Consumes the body and returns its bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::BodyAlreadyConsumed`] on a second read.
    pub fn bytes(&mut self) -> Result<Vec<u8>, ResponseError> {
        self.consume()?;
        Ok(self.body.raw.clone().into_bytes())
    }

    fn consume(&mut self) -> Result<(), ResponseError> {
        if self.body.consumed {
            return Err(ResponseError::BodyAlreadyConsumed);
        }
        self.body.consumed = true;
        Ok(())
    }
}
