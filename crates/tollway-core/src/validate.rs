//! The schema validator.
//!
//! [`validate`] turns untyped, JSON-shaped input into a typed [`Value`]
//! according to a [`FieldType`]. Primitive types are coerced leniently so
//! that values taken from paths and query strings, which always arrive as
//! strings, validate the same way as JSON body values:
//!
//! | Declared  | Accepted input |
//! |-----------|----------------|
//! | `string`  | strings only |
//! | `integer` | integers, floats without a fractional part, integer strings |
//! | `number`  | any number, strings holding a finite number |
//! | `boolean` | booleans, `0`/`1`, and the strings `true/false/1/0/yes/no/on/off/t/f/y/n` |
//!
//! Objects are validated field by field in declaration order and the first
//! failure is returned. Absent fields take their default; unknown keys are
//! ignored.

use serde_json::Value as Raw;

use crate::error::ValidationError;
use crate::schema::{FieldType, Schema};
use crate::value::Value;

/// The outcome of validating one value.
pub type ValidatedValue = Result<Value, ValidationError>;

/// Validates `raw` against `ty`.
///
/// # Example
///
/// ```rust
/// use tollway_core::{validate, FieldType, Value};
/// use serde_json::json;
///
/// assert_eq!(validate(&json!("10"), &FieldType::Integer), Ok(Value::Int(10)));
/// assert!(validate(&json!("ten"), &FieldType::Integer).is_err());
/// assert_eq!(validate(&json!(null), &FieldType::optional(FieldType::String)), Ok(Value::Null));
/// ```
pub fn validate(raw: &Raw, ty: &FieldType) -> ValidatedValue {
    validate_at(raw, ty, "")
}

/// Validates `raw` against an object schema.
pub fn validate_schema(raw: &Raw, schema: &Schema) -> ValidatedValue {
    validate_object(raw, schema, "")
}

fn validate_at(raw: &Raw, ty: &FieldType, path: &str) -> ValidatedValue {
    match ty {
        FieldType::Any => Ok(Value::from(raw.clone())),
        FieldType::Optional(inner) => {
            if raw.is_null() {
                Ok(Value::Null)
            } else {
                validate_at(raw, inner, path)
            }
        }
        FieldType::String => match raw {
            Raw::String(s) => Ok(Value::String(s.clone())),
            other => Err(mismatch(path, ty, other)),
        },
        FieldType::Integer => coerce_integer(raw)
            .map(Value::Int)
            .ok_or_else(|| mismatch(path, ty, raw)),
        FieldType::Number => coerce_number(raw)
            .map(Value::Float)
            .ok_or_else(|| mismatch(path, ty, raw)),
        FieldType::Boolean => coerce_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| mismatch(path, ty, raw)),
        FieldType::List(item) => {
            let Raw::Array(items) = raw else {
                return Err(mismatch(path, ty, raw));
            };
            items
                .iter()
                .enumerate()
                .map(|(index, element)| validate_at(element, item, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        FieldType::Object(schema) => validate_object(raw, schema, path),
    }
}

fn validate_object(raw: &Raw, schema: &Schema, path: &str) -> ValidatedValue {
    let Raw::Object(input) = raw else {
        return Err(ValidationError::type_mismatch(
            path,
            schema.name(),
            describe(raw),
        ));
    };

    let mut fields = indexmap::IndexMap::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let field_path = join(path, field.name());
        let value = match (input.get(field.name()), field.default()) {
            (Some(present), _) => validate_at(present, field.ty(), &field_path)?,
            (None, Some(default)) => default.clone(),
            (None, None) => return Err(ValidationError::missing_field(field_path)),
        };
        fields.insert(field.name().to_string(), value);
    }

    Ok(Value::Object(fields))
}

fn coerce_integer(raw: &Raw) -> Option<i64> {
    match raw {
        Raw::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15)
                .map(|f| f as i64)
        }),
        Raw::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn coerce_number(raw: &Raw) -> Option<f64> {
    match raw {
        Raw::Number(n) => n.as_f64(),
        Raw::String(s) => s.parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn coerce_bool(raw: &Raw) -> Option<bool> {
    match raw {
        Raw::Bool(b) => Some(*b),
        Raw::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Raw::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn mismatch(path: &str, expected: &FieldType, found: &Raw) -> ValidationError {
    ValidationError::type_mismatch(path, expected.to_string(), describe(found))
}

/// Describes a raw value for error messages, quoting short scalars.
fn describe(raw: &Raw) -> String {
    match raw {
        Raw::Null => "null".to_string(),
        Raw::Bool(b) => format!("boolean {b}"),
        Raw::Number(n) => format!("number {n}"),
        Raw::String(s) if s.chars().count() <= 32 => format!("string {s:?}"),
        Raw::String(_) => "string".to_string(),
        Raw::Array(_) => "list".to_string(),
        Raw::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_schema() -> Schema {
        Schema::builder("Item")
            .field("name", FieldType::String)
            .field("price", FieldType::Number)
            .field_with_default("tags", FieldType::list(FieldType::String), Value::List(vec![]))
            .optional("description", FieldType::String)
            .build()
    }

    #[test]
    fn test_string_rejects_numbers() {
        let err = validate(&json!(5), &FieldType::String).unwrap_err();
        assert_eq!(err, ValidationError::type_mismatch("", "string", "number 5"));
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(validate(&json!(7), &FieldType::Integer), Ok(Value::Int(7)));
        assert_eq!(validate(&json!(7.0), &FieldType::Integer), Ok(Value::Int(7)));
        assert_eq!(validate(&json!("-12"), &FieldType::Integer), Ok(Value::Int(-12)));
        assert!(validate(&json!(7.5), &FieldType::Integer).is_err());
        assert!(validate(&json!("1.5"), &FieldType::Integer).is_err());
        assert!(validate(&json!(true), &FieldType::Integer).is_err());

        let err = validate(&json!("abc"), &FieldType::Integer).unwrap_err();
        assert_eq!(err.to_string(), "expected integer, got string \"abc\"");
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(validate(&json!(3), &FieldType::Number), Ok(Value::Float(3.0)));
        assert_eq!(validate(&json!("2.5"), &FieldType::Number), Ok(Value::Float(2.5)));
        assert!(validate(&json!("NaN"), &FieldType::Number).is_err());
        assert!(validate(&json!("inf"), &FieldType::Number).is_err());
    }

    #[test]
    fn test_bool_coercion() {
        for truthy in ["true", "True", "1", "yes", "on", "t", "Y"] {
            assert_eq!(validate(&json!(truthy), &FieldType::Boolean), Ok(Value::Bool(true)));
        }
        for falsy in ["false", "0", "no", "OFF", "f", "n"] {
            assert_eq!(validate(&json!(falsy), &FieldType::Boolean), Ok(Value::Bool(false)));
        }
        assert_eq!(validate(&json!(1), &FieldType::Boolean), Ok(Value::Bool(true)));
        assert!(validate(&json!(2), &FieldType::Boolean).is_err());
        assert!(validate(&json!("maybe"), &FieldType::Boolean).is_err());
    }

    #[test]
    fn test_null_only_for_optional() {
        let err = validate(&json!(null), &FieldType::Integer).unwrap_err();
        assert_eq!(err.reason(), "expected integer, got null");
        assert_eq!(
            validate(&json!(null), &FieldType::optional(FieldType::Integer)),
            Ok(Value::Null)
        );
        assert_eq!(
            validate(&json!("4"), &FieldType::optional(FieldType::Integer)),
            Ok(Value::Int(4))
        );
    }

    #[test]
    fn test_schema_defaults_and_order() {
        let value = validate_schema(&json!({"price": 3, "name": "pen"}), &item_schema()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "price", "tags", "description"]);
        assert_eq!(value.get("tags"), Some(&Value::List(vec![])));
        assert_eq!(value.get("description"), Some(&Value::Null));
    }

    #[test]
    fn test_empty_list_is_kept() {
        let value = validate_schema(
            &json!({"name": "pen", "price": 1, "tags": []}),
            &item_schema(),
        )
        .unwrap();
        assert_eq!(value.get("tags"), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let value = validate_schema(
            &json!({"name": "pen", "price": 1, "colour": "red"}),
            &item_schema(),
        )
        .unwrap();
        assert!(value.get("colour").is_none());
    }

    #[test]
    fn test_missing_field() {
        let err = validate_schema(&json!({"price": 1}), &item_schema()).unwrap_err();
        assert_eq!(err, ValidationError::missing_field("name"));
    }

    #[test]
    fn test_fail_fast_in_declaration_order() {
        let err = validate_schema(&json!({"price": "cheap"}), &item_schema()).unwrap_err();
        assert_eq!(err, ValidationError::missing_field("name"));

        let err = validate_schema(&json!({"name": 1, "price": "cheap"}), &item_schema()).unwrap_err();
        assert_eq!(err.path(), "name");
    }

    #[test]
    fn test_nested_paths() {
        let owner = Schema::builder("Owner")
            .field("name", FieldType::String)
            .field("ids", FieldType::list(FieldType::Integer))
            .build();
        let schema = Schema::builder("Order")
            .field("owner", FieldType::object(owner))
            .build();

        let err = validate_schema(&json!({"owner": {"name": "a", "ids": [1, "x"]}}), &schema)
            .unwrap_err();
        assert_eq!(err.path(), "owner.ids[1]");

        let err = validate_schema(&json!({"owner": {"ids": []}}), &schema).unwrap_err();
        assert_eq!(err, ValidationError::missing_field("owner.name"));

        let err = validate_schema(&json!({"owner": []}), &schema).unwrap_err();
        assert_eq!(err, ValidationError::type_mismatch("owner", "Owner", "list"));
    }

    #[test]
    fn test_list_requires_sequence() {
        let err = validate(&json!("a"), &FieldType::list(FieldType::String)).unwrap_err();
        assert_eq!(err.reason(), "expected list[string], got string \"a\"");
    }
}
