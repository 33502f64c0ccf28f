//! Typed values.
//!
//! [`Value`] is what the validator produces and what handlers return. Unlike
//! `serde_json::Value` it distinguishes integers from floats explicitly and
//! always keeps object fields in insertion order, so a value validated against
//! a schema serializes its fields in declaration order.

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

/// A typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value (`null`).
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A finite floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// An ordered mapping from field name to value.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Converts any serializable value.
    ///
    /// Struct fields keep their declaration order.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::from)
    }

    /// Deserializes into a concrete type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    /// Converts to a `serde_json::Value`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Returns a short name for the value's kind, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64`, for integers and floats.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field of an object.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(field))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => serializer.collect_seq(items),
            Self::Object(fields) => serializer.collect_map(fields),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(fields) => {
                Self::Object(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_object_serializes_in_insertion_order() {
        let value: Value = [
            ("query".to_string(), Value::from("foo")),
            ("limit".to_string(), Value::Int(10)),
            ("cursor".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"query":"foo","limit":10,"cursor":null}"#
        );
    }

    #[test]
    fn test_from_json_keeps_integers() {
        let value = Value::from(json!({"a": 1, "b": 1.5, "c": [true, null]}));
        assert_eq!(value.get("a"), Some(&Value::Int(1)));
        assert_eq!(value.get("b"), Some(&Value::Float(1.5)));
        assert_eq!(
            value.get("c"),
            Some(&Value::List(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn test_from_serialize_struct_order() {
        #[derive(Serialize)]
        struct Message {
            zeta: u8,
            alpha: &'static str,
        }

        let value = Value::from_serialize(&Message { zeta: 1, alpha: "a" }).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Item {
            name: String,
            tags: Vec<String>,
        }

        let value = Value::from(json!({"name": "pen", "tags": ["x"]}));
        let item: Item = value.deserialize().unwrap();
        assert_eq!(
            item,
            Item {
                name: "pen".to_string(),
                tags: vec!["x".to_string()]
            }
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(Some(true)).as_bool(), Some(true));
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(vec![1i64, 2]).as_list().map(<[Value]>::len), Some(2));
        assert_eq!(Value::Float(1.5).type_name(), "number");
        assert_eq!(Value::from("x").to_string(), "\"x\"");
    }
}
