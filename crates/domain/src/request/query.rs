//! Query parameter types

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A collection of query parameters.
///
/// Parameters never travel in the vendor option bag; they are appended to
/// the target URL before mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a parameter to the collection.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push(QueryParam::new(key, value));
    }

    /// Returns all parameters in insertion order.
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends the parameters to a URL's query string.
    ///
    /// Existing query pairs on the URL are kept; these are added after
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the URL cannot be parsed.
    pub fn append_to(&self, url: &str) -> DomainResult<String> {
        if self.items.is_empty() {
            return Ok(url.to_string());
        }

        let mut parsed =
            Url::parse(url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))?;
        {
            let mut pairs = parsed.query_pairs_mut();
            for param in &self.items {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        Ok(parsed.into())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, v)| QueryParam::new(k, v))
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_to_url() {
        let params: QueryParams = [("page", "1"), ("q", "a b")].into_iter().collect();
        let url = params.append_to("https://example.com/search").unwrap();
        assert_eq!(url, "https://example.com/search?page=1&q=a+b");
    }

    #[test]
    fn test_append_keeps_existing_query() {
        let params: QueryParams = [("b", "2")].into_iter().collect();
        let url = params.append_to("https://example.com/?a=1").unwrap();
        assert_eq!(url, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn test_empty_params_leave_url_untouched() {
        let params = QueryParams::new();
        let url = params.append_to("not a url").unwrap();
        assert_eq!(url, "not a url");
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let params: QueryParams = [("a", "1")].into_iter().collect();
        assert!(matches!(
            params.append_to("::"),
            Err(DomainError::InvalidUrl(_))
        ));
    }
}
