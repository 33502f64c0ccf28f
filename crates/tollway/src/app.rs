//! The application: a route table plus the request dispatch loop.
//!
//! Dispatch runs the same fixed sequence for every request:
//!
//! ```text
//! match route → parse query → bind params → handler → validate response → build response
//!      │                           │            │              │
//!      └── 404 / 405               └── 4xx      └── ApiError   └── 500
//! ```
//!
//! Every outcome, including errors, is turned into a [`Response`]; nothing
//! escapes [`App::handle`].

use std::time::Instant;

use bytes::Bytes;
use http::header::{HeaderValue, ALLOW};
use http::Method;
use tollway_core::{validate, Value};
use tollway_extract::{
    Binder, ErrorResponse, RequestParts, Response, ResponseContext, DEFAULT_MAX_BODY_BYTES,
};
use tollway_router::{PathPattern, RouteId};
use tollway_telemetry::{record_binding_failure, record_request};

use crate::error::{ApiError, RegistrationError};
use crate::group::RouteGroup;
use crate::route::Route;
use crate::table::{MatchedRoute, RouteTable};

const UNMATCHED: &str = "unmatched";

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Human-readable application title
    pub title: String,
    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,
    /// Check handler results against the declared response type
    pub validate_responses: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: "Tollway".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            validate_responses: true,
        }
    }
}

/// A routed, validating application.
///
/// Routes are registered up front with [`route`](Self::route) and
/// [`include`](Self::include); afterwards the app is shared read-only and
/// [`handle`](Self::handle) may be called from any number of threads.
///
/// # Example
///
/// ```rust
/// use tollway::{App, Route, ParamSpec, FieldType, RequestParts};
/// use http::{Method, StatusCode};
/// use serde_json::json;
///
/// let mut app = App::new();
/// app.route(
///     Route::get("/hello/{name}")
///         .param(ParamSpec::path("name", FieldType::String))
///         .handler(|params, _| {
///             let name = params.str("name").unwrap_or_default();
///             Ok(json!({ "message": format!("Hello {name}") }))
///         }),
/// )
/// .unwrap();
///
/// let request = RequestParts::new(Method::GET, "/hello/World".parse().unwrap());
/// let response = app.handle(&request);
///
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(
///     response.body().map(|b| b.to_json()),
///     Some(json!({"message": "Hello World"}))
/// );
/// ```
#[derive(Debug, Default)]
pub struct App {
    settings: AppSettings,
    binder: Binder,
    table: RouteTable,
}

impl App {
    /// Creates an app with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    /// Creates an app with the given settings.
    #[must_use]
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            binder: Binder::new().with_max_body_bytes(settings.max_body_bytes),
            settings,
            table: RouteTable::new(),
        }
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Returns the route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Registers a single route.
    pub fn route(&mut self, route: Route) -> Result<RouteId, RegistrationError> {
        self.table.register(route)
    }

    /// Registers every route of `group` under `prefix`.
    ///
    /// The group is registered as a unit: if any route fails, none of the
    /// group's routes are added.
    pub fn include(&mut self, prefix: &str, group: RouteGroup) -> Result<(), RegistrationError> {
        let prefix = PathPattern::parse(prefix)?;
        let routes = group
            .into_routes()
            .into_iter()
            .map(|route| route.prefixed(&prefix))
            .collect::<Result<Vec<_>, _>>()?;
        self.table.register_all(routes)?;
        Ok(())
    }

    /// Handles one request.
    pub fn handle(&self, request: &RequestParts) -> Response {
        let start = Instant::now();
        let method = request.method();
        let path = request.path();

        let (label, response) = match self.table.match_route(method, path) {
            Some(matched) => (matched.route.label(), self.dispatch(&matched, request)),
            None => (UNMATCHED, self.no_route(method, path)),
        };

        let elapsed = start.elapsed();
        let status = response.status().as_u16();
        record_request(label, status, elapsed);

        tracing::info!(
            http.method = %method,
            http.path = path,
            http.status_code = status,
            route.name = label,
            duration_ms = elapsed.as_secs_f64() * 1000.0,
            "Request completed"
        );

        response
    }

    /// Handles an `http` request and returns an `http` response.
    pub fn handle_http(&self, request: http::Request<Bytes>) -> http::Response<Bytes> {
        self.handle(&RequestParts::from(request)).into_http()
    }

    fn dispatch(&self, matched: &MatchedRoute<'_>, request: &RequestParts) -> Response {
        let label = matched.route.label();
        match self.invoke(matched, request) {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    ApiError::Binding(e) => {
                        record_binding_failure(e.location().as_str(), e.kind());
                        tracing::debug!(route.name = label, error = %e, "Request binding failed");
                    }
                    ApiError::Internal(e) => {
                        tracing::error!(route.name = label, error = ?e, "Handler failed");
                    }
                    _ => {}
                }
                err.to_response()
            }
        }
    }

    fn invoke(&self, matched: &MatchedRoute<'_>, request: &RequestParts) -> Result<Response, ApiError> {
        let route = matched.route;

        let query = request.raw_query()?;
        let params = self
            .binder
            .bind(route.contract(), &matched.params, &query, request.body())?;

        let mut ctx = ResponseContext::with_status(route.status());
        let body = route.call(&params, &mut ctx)?;
        let body = self.check_response(route, body)?;

        Ok(Response::build(body, ctx))
    }

    /// Validates a handler result against the route's response type and
    /// returns the normalized value.
    fn check_response(&self, route: &Route, body: Value) -> Result<Value, ApiError> {
        let Some(ty) = route.contract().response_type() else {
            return Ok(body);
        };
        if !self.settings.validate_responses {
            return Ok(body);
        }

        validate(&body.to_json(), ty).map_err(|e| {
            ApiError::internal(
                anyhow::Error::new(e)
                    .context(format!("response of '{}' does not match its declared type", route.label())),
            )
        })
    }

    fn no_route(&self, method: &Method, path: &str) -> Response {
        let allowed = self.table.allowed_methods(path);
        if allowed.is_empty() {
            return ErrorResponse::not_found("Not Found").into_response();
        }

        tracing::debug!(http.method = %method, http.path = path, "Method not allowed");

        let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
        let response = ErrorResponse::method_not_allowed("Method Not Allowed").into_response();
        match HeaderValue::from_str(&allow) {
            Ok(value) => response.with_header(ALLOW, value),
            Err(_) => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;
    use tollway_core::FieldType;
    use tollway_extract::ParamSpec;

    fn get(uri: &str) -> RequestParts {
        RequestParts::new(Method::GET, uri.parse().unwrap())
    }

    fn json_body(response: &Response) -> serde_json::Value {
        response.body().map(Value::to_json).unwrap_or_default()
    }

    #[test]
    fn test_app_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<App>();
    }

    #[test]
    fn test_settings_flow_into_binder() {
        let app = App::with_settings(AppSettings {
            max_body_bytes: 8,
            ..AppSettings::default()
        });
        assert_eq!(app.binder.max_body_bytes(), 8);
        assert_eq!(app.settings().title, "Tollway");
    }

    #[test]
    fn test_not_found() {
        let app = App::new();
        let response = app.handle(&get("/nope"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(&response), json!({"detail": "Not Found", "code": "NOT_FOUND"}));
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let mut app = App::new();
        app.route(Route::get("/items").handler(|_, _| Ok(()))).unwrap();
        app.route(Route::post("/items").handler(|_, _| Ok(()))).unwrap();

        let request = RequestParts::new(Method::DELETE, "/items".parse().unwrap());
        let response = app.handle(&request);

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let allow = response.header("allow").unwrap();
        assert!(allow.contains("GET"));
        assert!(allow.contains("POST"));
    }

    #[test]
    fn test_response_normalized_against_declared_type() {
        let mut app = App::new();
        app.route(
            Route::get("/count")
                .response(FieldType::Integer)
                .handler(|_, _| Ok("5")),
        )
        .unwrap();

        let response = app.handle(&get("/count"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), json!(5));
    }

    #[test]
    fn test_response_mismatch_is_internal_error() {
        let mut app = App::new();
        app.route(
            Route::get("/count")
                .response(FieldType::Integer)
                .handler(|_, _| Ok("five")),
        )
        .unwrap();

        let response = app.handle(&get("/count"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(&response),
            json!({"detail": "Internal Server Error", "code": "INTERNAL_ERROR"})
        );
    }

    #[test]
    fn test_response_validation_can_be_disabled() {
        let mut app = App::with_settings(AppSettings {
            validate_responses: false,
            ..AppSettings::default()
        });
        app.route(
            Route::get("/count")
                .response(FieldType::Integer)
                .handler(|_, _| Ok("five")),
        )
        .unwrap();

        let response = app.handle(&get("/count"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(&response), json!("five"));
    }

    #[test]
    fn test_binding_error_envelope() {
        let mut app = App::new();
        app.route(
            Route::get("/items/{item_id}")
                .param(ParamSpec::path("item_id", FieldType::Integer))
                .handler(|_, _| Ok(())),
        )
        .unwrap();

        let response = app.handle(&get("/items/foo"));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(&response);
        assert_eq!(body["code"], json!("INVALID_PARAMETER"));
        assert_eq!(body["detail"][0]["loc"], json!(["path", "item_id"]));
    }

    #[test]
    fn test_handle_http() {
        let mut app = App::new();
        app.route(Route::get("/").handler(|_, _| Ok(json!({"message": "Hello World"}))))
            .unwrap();

        let request = http::Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Bytes::new())
            .unwrap();
        let response = app.handle_http(request);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.body().as_ref(), br#"{"message":"Hello World"}"#);
    }
}
