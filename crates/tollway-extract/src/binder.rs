//! The parameter binder.
//!
//! Binding turns the raw parts of a matched request into [`BoundParams`]
//! according to the route's [`Contract`]:
//!
//! - **Path** parameters arrive percent-decoded from the router and are
//!   validated against their declared scalar type. They are always present
//!   once the route matched.
//! - **Query** parameters are looked up by name. Absent parameters take their
//!   default, or fail with [`BindingError::MissingParameter`].
//! - A **query object** binds each field of its schema exactly like a query
//!   parameter of the same name, type and default, then assembles the fields
//!   into one object.
//! - The **body** parameter, if declared, is decoded as JSON and validated.
//!   Without a body parameter the request body is never read.

use indexmap::IndexMap;
use serde_json::Value as Raw;
use tollway_core::{validate, FieldType, Value};
use tollway_router::Params;

use crate::bound::BoundParams;
use crate::contract::{Contract, ParamKind, ParamSpec};
use crate::error::{BindingError, ParamSource};
use crate::query::RawQuery;

/// Default maximum body size (1 MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Binds requests to route contracts.
///
/// # Example
///
/// ```rust
/// use tollway_core::{FieldType, Value};
/// use tollway_extract::{Binder, Contract, ParamSpec, RawQuery};
/// use tollway_router::Params;
///
/// let contract = Contract::new()
///     .param(ParamSpec::query("q", FieldType::String))
///     .param(ParamSpec::query_with_default("limit", FieldType::Integer, 10i64))
///     .param(ParamSpec::query_optional("cursor", FieldType::String));
///
/// let query = RawQuery::parse("q=foo").unwrap();
/// let bound = Binder::new().bind(&contract, &Params::new(), &query, b"").unwrap();
///
/// assert_eq!(bound.get("q"), Some(&Value::from("foo")));
/// assert_eq!(bound.get("limit"), Some(&Value::Int(10)));
/// assert_eq!(bound.get("cursor"), Some(&Value::Null));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binder {
    max_body_bytes: usize,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Binder {
    /// Creates a binder with the default body limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the maximum accepted body size.
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Returns the maximum accepted body size.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Binds every parameter of `contract`, stopping at the first failure.
    pub fn bind(
        &self,
        contract: &Contract,
        path: &Params,
        query: &RawQuery,
        body: &[u8],
    ) -> Result<BoundParams, BindingError> {
        let mut bound = BoundParams::new();

        for spec in contract.params() {
            let value = match spec.kind() {
                ParamKind::Path => bind_path(spec, path)?,
                ParamKind::Query => bind_query(spec, query)?,
                ParamKind::QueryObject => bind_query_object(spec, query)?,
                ParamKind::Body => self.bind_body(spec, body)?,
            };
            bound.insert(spec.name(), value);
        }

        Ok(bound)
    }

    fn bind_body(&self, spec: &ParamSpec, body: &[u8]) -> Result<Value, BindingError> {
        if body.len() > self.max_body_bytes {
            return Err(BindingError::PayloadTooLarge {
                limit: self.max_body_bytes,
                actual: body.len(),
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return spec
                .default()
                .cloned()
                .ok_or_else(|| BindingError::missing(ParamSource::Body, spec.name()));
        }

        let raw: Raw =
            serde_json::from_slice(body).map_err(|e| BindingError::MalformedBody(e.to_string()))?;

        validate(&raw, spec.ty()).map_err(|e| BindingError::invalid(ParamSource::Body, spec.name(), e))
    }
}

/// Binds with the default body limit.
pub fn bind(
    contract: &Contract,
    path: &Params,
    query: &RawQuery,
    body: &[u8],
) -> Result<BoundParams, BindingError> {
    Binder::new().bind(contract, path, query, body)
}

fn bind_path(spec: &ParamSpec, path: &Params) -> Result<Value, BindingError> {
    let raw = path
        .get(spec.name())
        .ok_or_else(|| BindingError::missing(ParamSource::Path, spec.name()))?;

    validate(&Raw::String(raw.to_string()), spec.ty())
        .map_err(|e| BindingError::invalid(ParamSource::Path, spec.name(), e))
}

fn bind_query(spec: &ParamSpec, query: &RawQuery) -> Result<Value, BindingError> {
    bind_query_value(spec.name(), spec.ty(), spec.default(), query)
}

fn bind_query_object(spec: &ParamSpec, query: &RawQuery) -> Result<Value, BindingError> {
    let Some(schema) = spec.ty().schema() else {
        return bind_query(spec, query);
    };

    let mut fields = IndexMap::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let value = bind_query_value(field.name(), field.ty(), field.default(), query)?;
        fields.insert(field.name().to_string(), value);
    }
    Ok(Value::Object(fields))
}

/// Binds one query key. Field names are taken verbatim, dots included.
fn bind_query_value(
    name: &str,
    ty: &FieldType,
    default: Option<&Value>,
    query: &RawQuery,
) -> Result<Value, BindingError> {
    match query.raw_value(name, ty.is_list()) {
        Some(raw) => {
            validate(&raw, ty).map_err(|e| BindingError::invalid(ParamSource::Query, name, e))
        }
        None => default
            .cloned()
            .ok_or_else(|| BindingError::missing(ParamSource::Query, name)),
    }
}
