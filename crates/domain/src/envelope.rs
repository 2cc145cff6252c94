//! Vendor reply envelope
//!
//! Every call returns one JSON envelope. The scraped result lives in the
//! `solution` sub-object; session creation additionally returns a
//! `fingerprint`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cookie::Cookie;

/// Outcome flag carried in the envelope's `data` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The vendor performed the call.
    Success,
    /// The vendor rejected or failed the call; see `error`.
    Error,
}

/// The top-level JSON object returned by the vendor for every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Call outcome.
    #[serde(rename = "data")]
    pub outcome: EnvelopeStatus,
    /// Session id the call ran under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Vendor-side elapsed time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<u64>,
    /// The scraped result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    /// Vendor error message when the outcome is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Browser fingerprint, present on session creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Value>,
}

impl Envelope {
    /// Returns true when the vendor reported failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.outcome == EnvelopeStatus::Error
    }

    /// Returns the vendor error message, or a generic one.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "request failed".to_string())
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            outcome: EnvelopeStatus::Success,
            session: None,
            time_elapsed: None,
            solution: None,
            error: None,
            fingerprint: None,
        }
    }
}

/// The envelope sub-object carrying the scraped result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Whether the request verified and consumed balance.
    #[serde(default)]
    pub verified: bool,
    /// Rendered page HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Extracted page text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,
    /// HTTP status the target site answered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Final URL after redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_url: Option<String>,
    /// User agent the vendor browser presented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Cookies collected during the scrape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,
    /// Cookies as a single header string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_string: Option<String>,
    /// Headers the target site answered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<Map<String, Value>>,
    /// Exit-node IP information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_info: Option<Value>,
    /// Base64-encoded screenshot payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Hosted screenshot URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
    /// Hosted video recording URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Results of executed JavaScript snippets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript_return: Option<Vec<Value>>,
}

impl Solution {
    /// The best textual representation of the page: extracted text when
    /// available, raw HTML otherwise.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.inner_text
            .as_deref()
            .or(self.response.as_deref())
    }

    /// Decodes the base64 screenshot payload.
    ///
    /// Returns `None` when no screenshot is present.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the payload is not valid base64.
    pub fn screenshot_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        self.screenshot
            .as_deref()
            .map(|payload| BASE64.decode(payload))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_envelope_parses_success_reply() {
        let envelope: Envelope = serde_json::from_value(json!({
            "data": "success",
            "session": "86908d12-b225-446c-bb16-dc5c283e1d59",
            "timeElapsed": 1234,
            "solution": {
                "verified": true,
                "response": "<html></html>",
                "statusCode": 200,
                "currentUrl": "https://example.com/"
            }
        }))
        .unwrap();

        assert!(!envelope.is_error());
        assert_eq!(envelope.time_elapsed, Some(1234));
        let solution = envelope.solution.unwrap();
        assert!(solution.verified);
        assert_eq!(solution.status_code, Some(200));
    }

    #[test]
    fn test_envelope_parses_error_reply() {
        let envelope: Envelope = serde_json::from_value(json!({
            "data": "error",
            "error": "CODE-0001: invalid proxy"
        }))
        .unwrap();

        assert!(envelope.is_error());
        assert_eq!(envelope.error_message(), "CODE-0001: invalid proxy");
    }

    #[test]
    fn test_error_message_falls_back() {
        let envelope = Envelope {
            outcome: EnvelopeStatus::Error,
            ..Envelope::default()
        };
        assert_eq!(envelope.error_message(), "request failed");
    }

    #[test]
    fn test_text_content_prefers_inner_text() {
        let solution = Solution {
            response: Some("<html>hi</html>".to_string()),
            inner_text: Some("hi".to_string()),
            ..Solution::default()
        };
        assert_eq!(solution.text_content(), Some("hi"));
    }

    #[test]
    fn test_screenshot_decodes() {
        let solution = Solution {
            screenshot: Some("aGVsbG8=".to_string()),
            ..Solution::default()
        };
        let bytes = solution.screenshot_bytes().unwrap().unwrap();
        assert_eq!(bytes, b"hello");

        assert!(Solution::default().screenshot_bytes().is_none());
    }
}
