//! Request body variants
//!
//! The body kind is chosen by the caller at construction time; nothing is
//! inferred from the shape of the payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request body, tagged by how it should reach the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// A pre-encoded string, forwarded verbatim.
    Text(String),
    /// A JSON document, serialized compactly at mapping time.
    Json(Value),
    /// Form fields, url-encoded and joined with `&` at mapping time.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Creates a verbatim text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialization error if `value` cannot be
    /// represented as JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Creates a form body from key-value pairs.
    #[must_use]
    pub fn form<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns true when there is no body to send.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_body_from_serializable() {
        let body = RequestBody::json(&json!({"email": "a@b.c"})).unwrap();
        assert_eq!(body, RequestBody::Json(json!({"email": "a@b.c"})));
    }

    #[test]
    fn test_form_body_collects_pairs() {
        let body = RequestBody::form([("a", "1"), ("b", "2")]);
        let RequestBody::Form(pairs) = body else {
            panic!("expected form body");
        };
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_default_is_none() {
        assert!(RequestBody::default().is_none());
        assert!(!RequestBody::text("x").is_none());
    }
}
