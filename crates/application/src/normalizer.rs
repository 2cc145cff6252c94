//! Response normalizer
//!
//! Reshapes a vendor envelope into a [`NormalizedResponse`]. The
//! translation is pure: status defaulting, header lower-casing, body
//! selection, and the vendor-metadata attachment all derive from the
//! envelope and the originating configuration alone.

use std::collections::BTreeMap;

use serde_json::Value;

use scrappey_domain::{
    Envelope, NormalizedResponse, RequestConfig, ResponseKind, Solution, VendorMeta,
};

/// Builds the normalized response for an envelope.
///
/// Body selection: when the caller asked for JSON or the vendor supplied
/// extracted text, the text is JSON-parsed with a fallback to the raw
/// text; otherwise the rendered HTML is used as-is.
#[must_use]
pub fn normalize(envelope: &Envelope, config: &RequestConfig) -> NormalizedResponse {
    let solution = envelope.solution.clone().unwrap_or_default();

    let status = solution.status_code.unwrap_or(200);
    let wants_json = config.response_kind == ResponseKind::Json;

    let (raw, json) = select_body(&solution, wants_json);
    let headers = lower_case_headers(&solution, json.is_some());

    let redirected = solution
        .current_url
        .as_deref()
        .is_some_and(|current| current != config.url);
    let url = solution
        .current_url
        .clone()
        .unwrap_or_else(|| config.url.clone());

    let meta = VendorMeta {
        verified: solution.verified,
        current_url: solution.current_url.clone(),
        user_agent: solution.user_agent.clone(),
        cookies: solution.cookies.clone().unwrap_or_default(),
        cookie_string: solution.cookie_string.clone(),
        time_elapsed: envelope.time_elapsed,
        session: envelope.session.clone(),
        ip_info: solution.ip_info.clone(),
    };

    NormalizedResponse::new(status, headers, url)
        .with_redirected(redirected)
        .with_meta(meta)
        .with_body(raw, json)
}

fn select_body(solution: &Solution, wants_json: bool) -> (String, Option<Value>) {
    if wants_json || solution.inner_text.is_some() {
        let raw = solution
            .inner_text
            .clone()
            .or_else(|| solution.response.clone())
            .unwrap_or_default();
        let json = serde_json::from_str(&raw).ok();
        (raw, json)
    } else {
        let raw = solution.response.clone().unwrap_or_default();
        (raw, None)
    }
}

fn lower_case_headers(solution: &Solution, body_is_json: bool) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(raw) = &solution.response_headers {
        for (name, value) in raw {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            headers.insert(name.to_ascii_lowercase(), rendered);
        }
    }

    if !headers.contains_key("content-type") {
        let fallback = if body_is_json {
            mime::APPLICATION_JSON.as_ref()
        } else {
            mime::TEXT_HTML.as_ref()
        };
        headers.insert("content-type".to_string(), fallback.to_string());
    }

    headers
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    fn envelope_with(solution: Solution) -> Envelope {
        Envelope {
            solution: Some(solution),
            session: Some("sess-1".to_string()),
            time_elapsed: Some(900),
            ..Envelope::default()
        }
    }

    #[test]
    fn test_status_404_maps_to_not_found() {
        let envelope = envelope_with(Solution {
            status_code: Some(404),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::default());
        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
    }

    #[test]
    fn test_empty_solution_defaults_to_200_ok() {
        let envelope = envelope_with(Solution::default());
        let response = normalize(&envelope, &RequestConfig::default());
        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
    }

    #[test]
    fn test_uncommon_status_renders_generically() {
        let envelope = envelope_with(Solution {
            status_code: Some(418),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::default());
        assert_eq!(response.status_text, "Status 418");
    }

    #[test]
    fn test_html_body_is_kept_raw() {
        let envelope = envelope_with(Solution {
            response: Some("<html>hi</html>".to_string()),
            ..Solution::default()
        });
        let mut response = normalize(&envelope, &RequestConfig::get("https://a"));
        assert_eq!(response.peek_json(), None);
        assert_eq!(response.text().unwrap(), "<html>hi</html>");
    }

    #[test]
    fn test_extracted_text_parses_as_json() {
        let envelope = envelope_with(Solution {
            inner_text: Some("{\"ok\":true}".to_string()),
            response: Some("<html>{\"ok\":true}</html>".to_string()),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::get("https://a"));
        assert_eq!(response.peek_json(), Some(&json!({"ok": true})));
    }

    #[test]
    fn test_json_request_falls_back_to_raw_text() {
        let envelope = envelope_with(Solution {
            inner_text: Some("not json".to_string()),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::get("https://a").expect_json());
        assert_eq!(response.peek_json(), None);
        assert_eq!(response.peek_text(), "not json");
    }

    #[test]
    fn test_headers_are_lower_cased_with_content_type_default() {
        let mut raw_headers = Map::new();
        raw_headers.insert("X-Frame-Options".to_string(), json!("DENY"));
        raw_headers.insert("Retry-After".to_string(), json!(30));
        let envelope = envelope_with(Solution {
            response_headers: Some(raw_headers),
            ..Solution::default()
        });

        let response = normalize(&envelope, &RequestConfig::default());
        assert_eq!(response.header("x-frame-options"), Some("DENY"));
        assert_eq!(response.header("retry-after"), Some("30"));
        assert_eq!(response.content_type(), Some("text/html"));
    }

    #[test]
    fn test_vendor_content_type_wins() {
        let mut raw_headers = Map::new();
        raw_headers.insert("Content-Type".to_string(), json!("text/plain"));
        let envelope = envelope_with(Solution {
            response_headers: Some(raw_headers),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::default());
        assert_eq!(response.content_type(), Some("text/plain"));
    }

    #[test]
    fn test_redirect_detection() {
        let envelope = envelope_with(Solution {
            current_url: Some("https://example.com/final".to_string()),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::get("https://example.com/start"));
        assert!(response.redirected);
        assert_eq!(response.url, "https://example.com/final");

        let same = envelope_with(Solution {
            current_url: Some("https://example.com/start".to_string()),
            ..Solution::default()
        });
        let response = normalize(&same, &RequestConfig::get("https://example.com/start"));
        assert!(!response.redirected);
    }

    #[test]
    fn test_meta_carries_session_and_timing() {
        let envelope = envelope_with(Solution {
            verified: true,
            user_agent: Some("UA".to_string()),
            cookie_string: Some("a=1".to_string()),
            ..Solution::default()
        });
        let response = normalize(&envelope, &RequestConfig::default());
        assert!(response.meta.verified);
        assert_eq!(response.meta.session.as_deref(), Some("sess-1"));
        assert_eq!(response.meta.time_elapsed, Some(900));
        assert_eq!(response.meta.cookie_string.as_deref(), Some("a=1"));
    }
}
