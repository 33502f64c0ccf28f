//! Bound parameter values handed to handlers.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tollway_core::Value;

/// The validated parameters of one request, keyed by parameter name in
/// declaration order.
///
/// # Example
///
/// ```rust
/// use tollway_core::Value;
/// use tollway_extract::BoundParams;
///
/// let mut bound = BoundParams::new();
/// bound.insert("q", Value::from("foo"));
/// bound.insert("limit", Value::Int(10));
///
/// assert_eq!(bound.str("q"), Some("foo"));
/// assert_eq!(bound.extract::<u32>("limit").unwrap(), 10);
/// assert_eq!(bound.extract::<Option<String>>("cursor").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: IndexMap<String, Value>,
}

impl BoundParams {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a bound value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the value bound to `name` if it is a string.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the value bound to `name` if it is an integer.
    #[must_use]
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Deserializes the value bound to `name`.
    ///
    /// An unbound name deserializes from `null`, so `Option<T>` yields `None`.
    pub fn extract<T: DeserializeOwned>(&self, name: &str) -> Result<T, serde_json::Error> {
        self.get(name).unwrap_or(&Value::Null).deserialize()
    }

    /// Deserializes every bound parameter as the fields of one `T`.
    pub fn extract_all<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        Value::Object(self.values.clone()).deserialize()
    }

    /// Returns an iterator over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts into an object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}
