//! Route declarations.
//!
//! A [`Route`] bundles a method, a path pattern, the parameter contract and
//! a handler. Routes are built with [`RouteBuilder`] and are immutable once
//! built.
//!
//! # Example
//!
//! ```rust
//! use tollway::{Route, ParamSpec, FieldType};
//! use http::Method;
//! use serde_json::json;
//!
//! let route = Route::get("/hello/{name}")
//!     .name("say_hello")
//!     .param(ParamSpec::path("name", FieldType::String))
//!     .handler(|params, _ctx| {
//!         let name = params.str("name").unwrap_or_default();
//!         Ok(json!({ "message": format!("Hello {name}") }))
//!     });
//!
//! assert_eq!(route.method(), &Method::GET);
//! assert_eq!(route.pattern(), "/hello/{name}");
//! assert_eq!(route.label(), "say_hello");
//! ```

use std::fmt;
use std::sync::Arc;

use http::{Method, StatusCode};
use serde::Serialize;
use tollway_core::{FieldType, Value};
use tollway_extract::{BoundParams, Contract, ParamSpec, ResponseContext};
use tollway_router::{PathPattern, RouterError};

use crate::error::ApiError;

/// A type-erased handler.
pub type HandlerFn =
    dyn Fn(&BoundParams, &mut ResponseContext) -> Result<Value, ApiError> + Send + Sync;

/// A registered route.
#[derive(Clone)]
pub struct Route {
    method: Method,
    pattern: String,
    name: Option<String>,
    contract: Contract,
    status: StatusCode,
    handler: Arc<HandlerFn>,
}

impl Route {
    /// Starts a route for an arbitrary method.
    pub fn on(method: Method, pattern: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            method,
            pattern: pattern.into(),
            name: None,
            contract: Contract::new(),
            status: StatusCode::OK,
        }
    }

    /// Starts a `GET` route.
    pub fn get(pattern: impl Into<String>) -> RouteBuilder {
        Self::on(Method::GET, pattern)
    }

    /// Starts a `POST` route.
    pub fn post(pattern: impl Into<String>) -> RouteBuilder {
        Self::on(Method::POST, pattern)
    }

    /// Starts a `PUT` route.
    pub fn put(pattern: impl Into<String>) -> RouteBuilder {
        Self::on(Method::PUT, pattern)
    }

    /// Starts a `DELETE` route.
    pub fn delete(pattern: impl Into<String>) -> RouteBuilder {
        Self::on(Method::DELETE, pattern)
    }

    /// Starts a `PATCH` route.
    pub fn patch(pattern: impl Into<String>) -> RouteBuilder {
        Self::on(Method::PATCH, pattern)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path pattern as written.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the explicit route name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name used in logs and metrics: the route name, or the
    /// pattern for unnamed routes.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.pattern)
    }

    /// Returns the parameter contract.
    #[must_use]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Returns the status used when the handler does not set one.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Invokes the handler.
    pub fn call(&self, params: &BoundParams, ctx: &mut ResponseContext) -> Result<Value, ApiError> {
        (self.handler)(params, ctx)
    }

    /// Returns this route with `prefix` prepended to its pattern.
    pub fn prefixed(mut self, prefix: &PathPattern) -> Result<Self, RouterError> {
        let pattern = PathPattern::parse(&self.pattern)?;
        self.pattern = prefix.join(&pattern)?.to_string();
        Ok(self)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("name", &self.name)
            .field("contract", &self.contract)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Route`].
#[derive(Debug)]
pub struct RouteBuilder {
    method: Method,
    pattern: String,
    name: Option<String>,
    contract: Contract,
    status: StatusCode,
}

impl RouteBuilder {
    /// Names the route.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declares a parameter. Parameters bind in declaration order.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.contract = self.contract.param(spec);
        self
    }

    /// Declares the response body type.
    pub fn response(mut self, ty: FieldType) -> Self {
        self.contract = self.contract.response(ty);
        self
    }

    /// Sets the default status for successful responses.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Finishes the route with its handler.
    ///
    /// The handler's result is converted to a [`Value`]; a result that cannot
    /// be represented becomes an internal error.
    pub fn handler<F, R>(self, handler: F) -> Route
    where
        F: Fn(&BoundParams, &mut ResponseContext) -> Result<R, ApiError> + Send + Sync + 'static,
        R: Serialize,
    {
        let erased = move |params: &BoundParams, ctx: &mut ResponseContext| {
            let result = handler(params, ctx)?;
            Value::from_serialize(&result).map_err(|e| {
                ApiError::internal(anyhow::Error::new(e).context("handler result is not serializable"))
            })
        };

        Route {
            method: self.method,
            pattern: self.pattern,
            name: self.name,
            contract: self.contract,
            status: self.status,
            handler: Arc::new(erased),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let route = Route::post("/items").handler(|_, _| Ok(()));
        assert_eq!(route.method(), &Method::POST);
        assert_eq!(route.status(), StatusCode::OK);
        assert_eq!(route.name(), None);
        assert_eq!(route.label(), "/items");
        assert!(route.contract().params().is_empty());
    }

    #[test]
    fn test_call_serializes_result() {
        #[derive(Serialize)]
        struct Message {
            message: String,
        }

        let route = Route::get("/").handler(|_, _| {
            Ok(Message {
                message: "Hello World".to_string(),
            })
        });

        let mut ctx = ResponseContext::new();
        let value = route.call(&BoundParams::new(), &mut ctx).unwrap();
        assert_eq!(value.to_json(), json!({"message": "Hello World"}));
    }

    #[test]
    fn test_handler_sets_status() {
        let route = Route::put("/items/{id}")
            .status(StatusCode::ACCEPTED)
            .handler(|_, ctx| {
                ctx.set_status(StatusCode::CREATED);
                Ok(json!(null))
            });

        let mut ctx = ResponseContext::with_status(route.status());
        route.call(&BoundParams::new(), &mut ctx).unwrap();
        assert_eq!(ctx.status(), Some(StatusCode::CREATED));
    }

    #[test]
    fn test_handler_error_passes_through() {
        let route = Route::delete("/items/{id}").handler(|_, _| -> Result<(), ApiError> {
            Err(ApiError::not_found("gone"))
        });
        let err = route.call(&BoundParams::new(), &mut ResponseContext::new()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_prefixed() {
        let prefix = PathPattern::parse("/items").unwrap();

        let route = Route::get("/").handler(|_, _| Ok(())).prefixed(&prefix).unwrap();
        assert_eq!(route.pattern(), "/items");

        let route = Route::get("/{item_id}")
            .handler(|_, _| Ok(()))
            .prefixed(&prefix)
            .unwrap();
        assert_eq!(route.pattern(), "/items/{item_id}");

        let prefix = PathPattern::parse("/users/{id}").unwrap();
        let err = Route::patch("/{id}").handler(|_, _| Ok(())).prefixed(&prefix);
        assert!(err.is_err());
    }
}
