//! Core types for Tollway.
//!
//! This crate holds the pieces every other Tollway crate builds on:
//!
//! - [`Schema`], [`Field`] and [`FieldType`]: declarative descriptions of the
//!   values a route accepts and returns, built at startup.
//! - [`Value`]: the typed, order-preserving result of validation.
//! - [`validate`] / [`validate_schema`]: the schema validator, which coerces
//!   untyped JSON-shaped input into a [`Value`] or reports the first failing
//!   field.
//!
//! # Example
//!
//! ```rust
//! use tollway_core::{validate_schema, FieldType, Schema, Value};
//! use serde_json::json;
//!
//! let item = Schema::builder("Item")
//!     .field("name", FieldType::String)
//!     .field("price", FieldType::Number)
//!     .field_with_default("tags", FieldType::list(FieldType::String), Value::List(vec![]))
//!     .build();
//!
//! let value = validate_schema(&json!({"name": "pen", "price": "3.5"}), &item).unwrap();
//! assert_eq!(value.get("price"), Some(&Value::Float(3.5)));
//! assert_eq!(value.get("tags"), Some(&Value::List(vec![])));
//! ```

pub mod error;
pub mod schema;
pub mod validate;
pub mod value;

pub use error::ValidationError;
pub use schema::{Field, FieldType, Schema, SchemaBuilder};
pub use validate::{validate, validate_schema, ValidatedValue};
pub use value::Value;
