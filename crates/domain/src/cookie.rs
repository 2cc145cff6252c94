//! Cookie types
//!
//! Cookies can be supplied either as a pre-built `Cookie:` header string
//! or as a structured jar; the two reach different vendor fields.

use serde::{Deserialize, Serialize};

/// A single cookie in the vendor's jar format.
///
/// The name serializes as `key` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name.
    #[serde(rename = "key")]
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Domain the cookie applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Path the cookie applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Cookie {
    /// Creates a cookie with just a name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }

    /// Scopes the cookie to a domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Scopes the cookie to a path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// How cookies are handed to the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookieInput {
    /// A raw `name=value; name2=value2` header string, sent as `cookies`.
    Header(String),
    /// A structured list, sent as `cookiejar`.
    Jar(Vec<Cookie>),
}

impl CookieInput {
    /// Creates a header-string input.
    #[must_use]
    pub fn header(value: impl Into<String>) -> Self {
        Self::Header(value.into())
    }

    /// Creates a jar input.
    #[must_use]
    pub fn jar(cookies: impl IntoIterator<Item = Cookie>) -> Self {
        Self::Jar(cookies.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_cookie_wire_shape() {
        let cookie = Cookie::new("sid", "abc")
            .with_domain("example.com")
            .with_path("/");
        let value = serde_json::to_value(&cookie).unwrap();
        assert_eq!(
            value,
            json!({"key": "sid", "value": "abc", "domain": "example.com", "path": "/"})
        );
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(Cookie::new("a", "b")).unwrap();
        assert_eq!(value, json!({"key": "a", "value": "b"}));
    }

    #[test]
    fn test_cookie_parses_with_unknown_fields() {
        let cookie: Cookie = serde_json::from_value(json!({
            "key": "a", "value": "b", "httpOnly": true
        }))
        .unwrap();
        assert_eq!(cookie.name, "a");
    }
}
