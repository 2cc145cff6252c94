//! Vendor option bag
//!
//! [`VendorOptions`] is the flat, camelCase wire structure the vendor
//! accepts alongside a command. The mapped fields (url, body, headers,
//! proxy, cookies, timeout, text extraction) are owned by the config
//! mapper; everything else rides in [`VendorExtensions`], the explicit
//! passthrough surface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::browser::BrowserAction;
use crate::cookie::Cookie;

/// Wire field names that must not be injected through the `extra` map.
///
/// These are either produced by the config mapper or owned by the send
/// path itself (`cmd`); a colliding extra key would silently fight the
/// typed surface.
pub const RESERVED_FIELDS: &[&str] = &[
    "cmd",
    "url",
    "postData",
    "customHeaders",
    "timeout",
    "proxy",
    "cookies",
    "cookiejar",
    "innerText",
    "session",
    "referer",
    "proxyCountry",
    "noProxy",
    "premiumProxy",
    "mobileProxy",
    "cloudflareBypass",
    "datadomeBypass",
    "kasadaBypass",
    "disableAntiBot",
    "automaticallySolveCaptchas",
    "alwaysLoad",
    "browserActions",
    "cssSelector",
    "includeImages",
    "includeLinks",
    "screenshot",
    "screenshotWidth",
    "screenshotHeight",
    "video",
    "pdf",
    "filter",
    "interceptFetchRequest",
    "abortOnDetection",
    "whitelistedDomains",
    "blackListedDomains",
    "fullPageLoad",
    "listAllRedirects",
    "blockCookieBanners",
    "removeIframes",
    "mouseMovements",
    "retries",
    "localStorage",
    "userAgent",
    "locales",
    "browser",
];

/// Returns true when `key` is owned by the typed surface.
#[must_use]
pub fn is_reserved_field(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

/// Vendor options with no ecosystem-side meaning, forwarded unchanged.
///
/// Every field is optional and omitted from the wire when unset. Fields
/// the typed surface does not anticipate can be placed in `extra`; the
/// mapper forwards them unless they collide with a reserved wire field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorExtensions {
    /// Session id to reuse an open browser tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Referer header set by the vendor browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// Country to source the proxy from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_country: Option<String>,
    /// Disable proxy usage entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<bool>,
    /// Use the premium proxy pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_proxy: Option<bool>,
    /// Use the mobile proxy pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_proxy: Option<bool>,
    /// Enable Cloudflare bypass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudflare_bypass: Option<bool>,
    /// Enable Datadome bypass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datadome_bypass: Option<bool>,
    /// Enable Kasada bypass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kasada_bypass: Option<bool>,
    /// Disable automatic antibot detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_anti_bot: Option<bool>,
    /// Auto-solve captchas the vendor detects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatically_solve_captchas: Option<bool>,
    /// Captcha types to always load solvers for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_load: Option<Vec<String>>,
    /// Browser script executed on the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_actions: Option<Vec<BrowserAction>>,
    /// Restrict extraction to elements matching this selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    /// Include image URLs in the solution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_images: Option<bool>,
    /// Include link URLs in the solution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_links: Option<bool>,
    /// Capture a screenshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<bool>,
    /// Screenshot width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_width: Option<u32>,
    /// Screenshot height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_height: Option<u32>,
    /// Record the browser session as video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<bool>,
    /// Render the page as PDF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<bool>,
    /// Return only these solution fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    /// URL patterns whose fetch responses are intercepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercept_fetch_request: Option<Vec<String>>,
    /// URL patterns that abort the scrape when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_on_detection: Option<Vec<String>>,
    /// Only allow requests to these domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelisted_domains: Option<Vec<String>>,
    /// Block requests to these domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_listed_domains: Option<Vec<String>>,
    /// Wait for the full page load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_page_load: Option<bool>,
    /// Track and return every redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_all_redirects: Option<bool>,
    /// Dismiss cookie consent banners.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_cookie_banners: Option<bool>,
    /// Strip iframes from the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_iframes: Option<bool>,
    /// Simulate human mouse movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_movements: Option<bool>,
    /// Vendor-side retry attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    /// LocalStorage entries to seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_storage: Option<Value>,
    /// User agent the vendor browser presents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Browser locales.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    /// Browser specification (vendor format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<Value>,
    /// Unanticipated vendor fields, forwarded best-effort by the mapper.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl VendorExtensions {
    /// Creates an empty passthrough bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses an existing session.
    #[must_use]
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Sources the proxy from a specific country.
    #[must_use]
    pub fn with_proxy_country(mut self, country: impl Into<String>) -> Self {
        self.proxy_country = Some(country.into());
        self
    }

    /// Enables Cloudflare bypass.
    #[must_use]
    pub const fn with_cloudflare_bypass(mut self) -> Self {
        self.cloudflare_bypass = Some(true);
        self
    }

    /// Enables automatic captcha solving.
    #[must_use]
    pub const fn with_captcha_solving(mut self) -> Self {
        self.automatically_solve_captchas = Some(true);
        self
    }

    /// Attaches a browser script.
    #[must_use]
    pub fn with_browser_actions(mut self, actions: Vec<BrowserAction>) -> Self {
        self.browser_actions = Some(actions);
        self
    }

    /// Requests a screenshot.
    #[must_use]
    pub const fn with_screenshot(mut self) -> Self {
        self.screenshot = Some(true);
        self
    }

    /// Adds an unanticipated vendor field, forwarded as-is by the mapper
    /// unless it collides with a reserved wire field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// The flat option bag sent to the vendor next to the `cmd` value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorOptions {
    /// Target URL (query parameters already applied).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Encoded request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
    /// Headers forwarded to the target site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<Map<String, Value>>,
    /// Timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Rendered proxy URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Cookie header string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
    /// Structured cookie jar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookiejar: Option<Vec<Cookie>>,
    /// Request extracted page text in the solution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<bool>,
    /// Passthrough options.
    #[serde(flatten)]
    pub ext: VendorExtensions,
    /// Unreserved extra fields admitted by the mapper.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VendorOptions {
    /// Creates an empty option bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the bag into a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if a passthrough value cannot be
    /// represented as JSON (practically unreachable for these types).
    pub fn to_object(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "vendor options serialized to non-object: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let options = VendorOptions::new();
        let object = options.to_object().unwrap();
        assert!(object.is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let mut options = VendorOptions::new();
        options.post_data = Some("a=1".to_string());
        options.inner_text = Some(true);
        options.ext.proxy_country = Some("UnitedStates".to_string());
        options.ext.black_listed_domains = Some(vec!["ads.example.com".to_string()]);

        let object = options.to_object().unwrap();
        assert_eq!(object.get("postData"), Some(&json!("a=1")));
        assert_eq!(object.get("innerText"), Some(&json!(true)));
        assert_eq!(object.get("proxyCountry"), Some(&json!("UnitedStates")));
        assert_eq!(
            object.get("blackListedDomains"),
            Some(&json!(["ads.example.com"]))
        );
    }

    #[test]
    fn test_cookiejar_keeps_single_word_name() {
        let mut options = VendorOptions::new();
        options.cookiejar = Some(vec![Cookie::new("k", "v")]);
        let object = options.to_object().unwrap();
        assert!(object.contains_key("cookiejar"));
        assert!(!object.contains_key("cookieJar"));
    }

    #[test]
    fn test_extra_fields_flatten_into_the_bag() {
        let mut options = VendorOptions::new();
        options
            .extra
            .insert("autoparse".to_string(), json!(true));
        let object = options.to_object().unwrap();
        assert_eq!(object.get("autoparse"), Some(&json!(true)));
    }

    #[test]
    fn test_reserved_field_lookup() {
        assert!(is_reserved_field("cmd"));
        assert!(is_reserved_field("postData"));
        assert!(!is_reserved_field("autoparse"));
    }
}
