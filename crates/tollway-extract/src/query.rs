//! Raw query string access.

use serde_json::Value as Raw;

use crate::error::BindingError;

/// A decoded query string, keeping every `(key, value)` pair in order.
///
/// Keys may repeat. A scalar parameter reads the last occurrence of its key;
/// a list parameter reads every occurrence.
///
/// # Example
///
/// ```rust
/// use tollway_extract::RawQuery;
///
/// let query = RawQuery::parse("tag=a&q=hello+world&tag=b").unwrap();
/// assert_eq!(query.last("q"), Some("hello world"));
/// assert_eq!(query.all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
/// assert!(!query.contains("limit"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    pairs: Vec<(String, String)>,
}

impl RawQuery {
    /// Parses an `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Result<Self, BindingError> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map_err(|e| BindingError::MalformedQuery(e.to_string()))?;
        Ok(Self { pairs })
    }

    /// Builds a query from already decoded pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the last value for `key`.
    #[must_use]
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `key`, in order.
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` occurs at least once.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns true if the query string had no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the raw input for a parameter named `key`.
    ///
    /// Lists collect every occurrence into an array; scalars take the last
    /// occurrence as a string. Returns `None` if the key is absent.
    #[must_use]
    pub fn raw_value(&self, key: &str, as_list: bool) -> Option<Raw> {
        if as_list {
            let items: Vec<Raw> = self.all(key).map(|v| Raw::String(v.to_string())).collect();
            (!items.is_empty()).then_some(Raw::Array(items))
        } else {
            self.last(key).map(|v| Raw::String(v.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty() {
        assert!(RawQuery::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_percent_decoding() {
        let query = RawQuery::parse("q=caf%C3%A9&x=a%26b").unwrap();
        assert_eq!(query.last("q"), Some("café"));
        assert_eq!(query.last("x"), Some("a&b"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let query = RawQuery::parse("q=").unwrap();
        assert!(query.contains("q"));
        assert_eq!(query.last("q"), Some(""));
    }

    #[test]
    fn test_raw_value() {
        let query = RawQuery::from_pairs([("id", "1"), ("id", "2"), ("q", "a"), ("q", "b")]);
        assert_eq!(query.raw_value("id", true), Some(json!(["1", "2"])));
        assert_eq!(query.raw_value("q", false), Some(json!("b")));
        assert_eq!(query.raw_value("missing", true), None);
        assert_eq!(query.raw_value("missing", false), None);
    }
}
