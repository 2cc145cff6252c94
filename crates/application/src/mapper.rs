//! Config mapper
//!
//! Translates an ecosystem-shaped [`RequestConfig`] into the vendor's
//! flat option bag. The translation is pure and deterministic: the same
//! configuration always yields the same options, and nothing outside the
//! typed surface plus the `extra` container ever reaches the wire.
//!
//! The mapping is lossy by contract: an `extra` key that collides with a
//! reserved wire field is dropped and reported on the debug log channel
//! instead of overwriting the typed field.

use serde_json::Map;
use tracing::debug;

use scrappey_domain::options::is_reserved_field;
use scrappey_domain::{
    CookieInput, DomainError, DomainResult, RequestBody, RequestConfig, ResponseKind,
    VendorOptions,
};

/// The outcome of mapping: the resolved target URL and the option bag.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRequest {
    /// Target URL with query parameters applied.
    pub url: String,
    /// Vendor options derived from the configuration.
    pub options: VendorOptions,
}

/// Maps a request configuration to vendor options.
///
/// Query parameters are applied to the URL here and never enter the
/// option bag.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] when query parameters are present
/// and the URL does not parse, or [`DomainError::InvalidBody`] when the
/// body cannot be encoded.
pub fn map_config(config: &RequestConfig) -> DomainResult<MappedRequest> {
    let url = config.resolved_url()?;

    let mut options = VendorOptions::new();
    options.url = Some(url.clone());

    if !config.headers.is_empty() {
        options.custom_headers = Some(config.headers.to_map());
    }

    options.post_data = encode_body(&config.body)?;

    if let Some(timeout) = config.timeout {
        options.timeout = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
    }

    if let Some(proxy) = &config.proxy {
        options.proxy = Some(proxy.render());
    }

    match &config.cookies {
        Some(CookieInput::Header(header)) => options.cookies = Some(header.clone()),
        Some(CookieInput::Jar(jar)) => options.cookiejar = Some(jar.clone()),
        None => {}
    }

    if config.response_kind == ResponseKind::Json {
        options.inner_text = Some(true);
    }

    options.ext = config.vendor.clone();
    options.ext.extra = Map::new();
    options.extra = admit_extra_fields(&config.vendor.extra);

    Ok(MappedRequest { url, options })
}

fn encode_body(body: &RequestBody) -> DomainResult<Option<String>> {
    match body {
        RequestBody::None => Ok(None),
        RequestBody::Text(text) => Ok(Some(text.clone())),
        RequestBody::Json(value) => serde_json::to_string(value)
            .map(Some)
            .map_err(|e| DomainError::InvalidBody(e.to_string())),
        RequestBody::Form(pairs) => serde_urlencoded::to_string(pairs)
            .map(Some)
            .map_err(|e| DomainError::InvalidBody(e.to_string())),
    }
}

fn admit_extra_fields(
    extra: &Map<String, serde_json::Value>,
) -> Map<String, serde_json::Value> {
    let mut admitted = Map::new();
    for (key, value) in extra {
        if is_reserved_field(key) {
            debug!(field = %key, "dropping extra vendor field that collides with a mapped field");
        } else {
            admitted.insert(key.clone(), value.clone());
        }
    }
    admitted
}
