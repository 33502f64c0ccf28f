//! Property tests for the schema validator.

use proptest::prelude::*;
use serde_json::json;
use tollway_core::{validate, validate_schema, FieldType, Schema, Value};

fn search_schema() -> Schema {
    Schema::builder("SearchQuery")
        .field("q", FieldType::String)
        .field_with_default("limit", FieldType::Integer, 10i64)
        .optional("cursor", FieldType::String)
        .build()
}

proptest! {
    #[test]
    fn prop_integer_strings_coerce(n in any::<i64>()) {
        prop_assert_eq!(validate(&json!(n.to_string()), &FieldType::Integer), Ok(Value::Int(n)));
    }

    #[test]
    fn prop_non_numeric_strings_are_rejected(s in "[a-zA-Z]{1,12}") {
        prop_assert!(validate(&json!(s), &FieldType::Integer).is_err());
    }

    #[test]
    fn prop_strings_pass_through(s in ".*") {
        prop_assert_eq!(validate(&json!(s.clone()), &FieldType::String), Ok(Value::String(s)));
    }

    #[test]
    fn prop_absent_optional_fields_take_defaults(q in "[a-z]{0,10}") {
        let value = validate_schema(&json!({"q": q.clone()}), &search_schema()).unwrap();
        prop_assert_eq!(value.get("q"), Some(&Value::String(q)));
        prop_assert_eq!(value.get("limit"), Some(&Value::Int(10)));
        prop_assert_eq!(value.get("cursor"), Some(&Value::Null));
    }

    #[test]
    fn prop_valid_objects_round_trip(name in "[a-z]{1,8}", price in 0i64..10_000, tags in prop::collection::vec("[a-z]{1,5}", 0..4)) {
        let schema = Schema::builder("Item")
            .field("name", FieldType::String)
            .field("price", FieldType::Integer)
            .field_with_default("tags", FieldType::list(FieldType::String), Value::List(vec![]))
            .build();
        let raw = json!({"name": name, "price": price, "tags": tags});

        let value = validate_schema(&raw, &schema).unwrap();
        prop_assert_eq!(value.to_json(), raw);
    }

    #[test]
    fn prop_list_elements_are_validated_in_order(items in prop::collection::vec(any::<i32>(), 0..8)) {
        let raw: Vec<String> = items.iter().map(ToString::to_string).collect();
        let value = validate(&json!(raw), &FieldType::list(FieldType::Integer)).unwrap();
        let expected: Vec<Value> = items.into_iter().map(Value::from).collect();
        prop_assert_eq!(value, Value::List(expected));
    }
}
