//! # Tollway Extract
//!
//! Parameter binding and response building for the Tollway framework.
//!
//! A route declares its parameters as a [`Contract`]. At request time the
//! [`Binder`] reads each declared parameter from its source, validates it
//! with the schema validator and hands the handler a [`BoundParams`]. Any
//! failure short-circuits with a [`BindingError`] that converts directly into
//! an [`ErrorResponse`].
//!
//! ## Parameter Sources
//!
//! | Declaration | Source | Notes |
//! |-------------|--------|-------|
//! | [`ParamSpec::path`] | URL path | Always present once the route matched |
//! | [`ParamSpec::query`] | Query string | Default or `MissingParameter` when absent |
//! | [`ParamSpec::query_object`] | Query string | One schema over all query fields |
//! | [`ParamSpec::body`] | Request body | JSON, at most one per route |
//!
//! ## Example
//!
//! ```rust
//! use tollway_core::{FieldType, Value};
//! use tollway_extract::{bind, Contract, ParamSpec, RawQuery};
//! use tollway_router::Params;
//!
//! let contract = Contract::new()
//!     .param(ParamSpec::path("item_id", FieldType::Integer))
//!     .param(ParamSpec::query_optional("q", FieldType::String));
//!
//! let params: Params = [("item_id", "5")].into_iter().collect();
//! let bound = bind(&contract, &params, &RawQuery::default(), b"").unwrap();
//!
//! assert_eq!(bound.get("item_id"), Some(&Value::Int(5)));
//! assert_eq!(bound.get("q"), Some(&Value::Null));
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use tollway_extract::{BindingError, ErrorResponse, ParamSource};
//! use http::StatusCode;
//!
//! let err = BindingError::missing(ParamSource::Query, "q");
//! let response = ErrorResponse::from_binding(&err).into_response();
//!
//! assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
//! ```

#![doc(html_root_url = "https://docs.rs/tollway-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod bound;
mod contract;
mod error;
mod query;
mod request;
pub mod response;

pub use binder::{bind, Binder, DEFAULT_MAX_BODY_BYTES};
pub use bound::BoundParams;
pub use contract::{Contract, ParamKind, ParamSpec};
pub use error::{BindingError, ContractError, ParamSource};
pub use query::RawQuery;
pub use request::RequestParts;
pub use response::{ErrorDetail, ErrorItem, ErrorResponse, Headers, Response, ResponseContext};
