//! Property tests for the parameter binder.

use std::sync::Arc;

use http::StatusCode;
use proptest::prelude::*;
use serde_json::json;
use tollway_core::{FieldType, Schema, Value};
use tollway_extract::{bind, BindingError, Contract, ParamSource, ParamSpec, RawQuery, Response, ResponseContext};
use tollway_router::{Params, PathPattern, RouteId, Router};

fn item_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("Item")
            .field("name", FieldType::String)
            .field("price", FieldType::Number)
            .field_with_default("tags", FieldType::list(FieldType::String), Value::List(vec![]))
            .optional("description", FieldType::String)
            .build(),
    )
}

fn search_contract() -> Contract {
    Contract::new()
        .param(ParamSpec::query("q", FieldType::String))
        .param(ParamSpec::query_with_default("limit", FieldType::Integer, 10i64))
        .param(ParamSpec::query_optional("cursor", FieldType::String))
}

fn search_object_contract() -> Contract {
    let schema = Schema::builder("SearchQuery")
        .field("q", FieldType::String)
        .field_with_default("limit", FieldType::Integer, 10i64)
        .optional("cursor", FieldType::String)
        .build();
    Contract::new().param(ParamSpec::query_object("params", schema))
}

fn query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

proptest! {
    #[test]
    fn prop_valid_bodies_round_trip_through_identity_handler(
        name in "[a-zA-Z ]{1,12}",
        price in 0i64..100_000,
        tags in prop::collection::vec("[a-z]{1,6}", 0..5),
    ) {
        let contract = Contract::new().param(ParamSpec::body("item", item_schema()));
        let raw = json!({"name": name, "price": price, "tags": tags, "description": null});
        let body = serde_json::to_vec(&raw).unwrap();

        let bound = bind(&contract, &Params::new(), &RawQuery::default(), &body).unwrap();
        let item = bound.get("item").cloned().unwrap();
        let response = Response::build(item, ResponseContext::new());

        prop_assert_eq!(response.status(), StatusCode::OK);
        let echoed = response.body().map(Value::to_json).unwrap();
        prop_assert_eq!(&echoed["name"], &raw["name"]);
        prop_assert_eq!(echoed["price"].as_f64(), Some(price as f64));
        prop_assert_eq!(&echoed["tags"], &raw["tags"]);
        prop_assert_eq!(&echoed["description"], &raw["description"]);
    }

    #[test]
    fn prop_absent_optional_query_params_take_defaults(q in "[a-z]{1,10}") {
        let query = RawQuery::from_pairs([("q", q.clone())]);
        let bound = bind(&search_contract(), &Params::new(), &query, b"").unwrap();

        prop_assert_eq!(bound.get("q"), Some(&Value::String(q)));
        prop_assert_eq!(bound.get("limit"), Some(&Value::Int(10)));
        prop_assert_eq!(bound.get("cursor"), Some(&Value::Null));
    }

    #[test]
    fn prop_absent_required_query_params_fail(limit in 0i64..1000) {
        let query = RawQuery::from_pairs([("limit", limit.to_string())]);
        let err = bind(&search_contract(), &Params::new(), &query, b"").unwrap_err();

        prop_assert_eq!(err, BindingError::missing(ParamSource::Query, "q"));
    }

    #[test]
    fn prop_absent_sequence_fields_bind_to_empty(name in "[a-z]{1,8}", price in 0u32..1000) {
        let contract = Contract::new().param(ParamSpec::body("item", item_schema()));
        let body = serde_json::to_vec(&json!({"name": name, "price": price})).unwrap();

        let bound = bind(&contract, &Params::new(), &RawQuery::default(), &body).unwrap();
        let item = bound.get("item").unwrap();

        prop_assert_eq!(item.get("tags"), Some(&Value::List(vec![])));
    }

    #[test]
    fn prop_query_object_matches_individual_params(
        pairs in prop::collection::vec(
            (prop::sample::select(vec!["q", "limit", "cursor", "other"]), "[a-z0-9]{0,4}"),
            0..5,
        )
    ) {
        let pairs: Vec<(String, String)> =
            pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        let query = RawQuery::parse(&query_string(&pairs)).unwrap();

        let individual = bind(&search_contract(), &Params::new(), &query, b"");
        let bundled = bind(&search_object_contract(), &Params::new(), &query, b"");

        match (individual, bundled) {
            (Ok(individual), Ok(bundled)) => {
                prop_assert_eq!(bundled.get("params"), Some(&individual.into_value()));
            }
            (Err(individual), Err(bundled)) => prop_assert_eq!(individual, bundled),
            (individual, bundled) => {
                prop_assert!(false, "outcomes differ: {individual:?} vs {bundled:?}");
            }
        }
    }

    #[test]
    fn prop_path_params_are_percent_decoded_once(name in "[a-zA-Z0-9 é%]{1,10}") {
        let pattern = PathPattern::parse("/hello/{name}").unwrap();
        let mut router = Router::new();
        router.insert(&http::Method::GET, &pattern, RouteId::new(0)).unwrap();
        let contract = Contract::new().param(ParamSpec::path("name", FieldType::String));

        let path = format!("/hello/{}", urlencoding::encode(&name));
        let matched = router.match_route(&http::Method::GET, &path).unwrap();
        let bound = bind(&contract, &matched.params, &RawQuery::default(), b"").unwrap();
        prop_assert_eq!(bound.str("name"), Some(name.as_str()));
    }
}

#[test]
fn test_body_is_ignored_without_body_param() {
    let bound = bind(
        &search_contract(),
        &Params::new(),
        &RawQuery::from_pairs([("q", "x")]),
        b"{not json",
    )
    .unwrap();
    assert_eq!(bound.len(), 3);
}
