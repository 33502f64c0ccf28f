//! Response construction.
//!
//! Handlers receive a [`ResponseContext`] by mutable reference. They may set
//! a status code and headers on it before returning a body. After the handler
//! returns, [`Response::build`] combines the body with the context into an
//! immutable [`Response`].
//!
//! # Example
//!
//! ```rust
//! use tollway_core::Value;
//! use tollway_extract::{Response, ResponseContext};
//! use http::StatusCode;
//!
//! let mut ctx = ResponseContext::new();
//! ctx.set_status(StatusCode::CREATED);
//! ctx.set_location("/items/1").unwrap();
//!
//! let response = Response::build(Value::from("ok"), ctx);
//! assert_eq!(response.status(), StatusCode::CREATED);
//! assert_eq!(response.header("location"), Some("/items/1"));
//! ```

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue, InvalidHeaderValue};
use http::StatusCode;
use serde::Serialize;
use tollway_core::Value;

use crate::error::BindingError;

/// An ordered multi-map of response headers.
///
/// Entries keep insertion order and a name may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl Headers {
    /// Creates an empty header list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, keeping existing values for the same name.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    /// Replaces every value for `name` with `value`.
    ///
    /// The new entry takes the position of the first replaced one.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(n, _)| {
                    let keep = index <= first || *n != name;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the first value for `name` as a string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .find_map(|(_, v)| v.to_str().ok())
    }

    /// Returns every value for `name` as strings, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .filter_map(|(_, v)| v.to_str().ok())
    }

    /// Returns an iterator over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Returns true if any value exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The mutable response state a handler may adjust.
#[derive(Debug, Clone, Default)]
pub struct ResponseContext {
    status: Option<StatusCode>,
    headers: Headers,
}

impl ResponseContext {
    /// Creates a context with no explicit status and no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context whose status starts as `status`.
    #[must_use]
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            headers: Headers::new(),
        }
    }

    /// Sets the response status.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// Returns the explicitly set status, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Replaces a header.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Appends a header.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    /// Sets the `Location` header to the address of a created resource.
    pub fn set_location(&mut self, location: &str) -> Result<(), InvalidHeaderValue> {
        let value = HeaderValue::from_str(location)?;
        self.headers.insert(header::LOCATION, value);
        Ok(())
    }

    /// Returns the headers set so far.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// A finished response: status, headers and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Option<Value>,
}

impl Response {
    /// Combines a handler result with its response context.
    ///
    /// The status is 200 unless the context says otherwise. A `204 No Content`
    /// status drops the body.
    #[must_use]
    pub fn build(body: Value, ctx: ResponseContext) -> Self {
        let status = ctx.status.unwrap_or(StatusCode::OK);
        let body = (status != StatusCode::NO_CONTENT).then_some(body);
        Self {
            status,
            headers: ctx.headers,
            body,
        }
    }

    /// A JSON response with the given status and no extra headers.
    #[must_use]
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Some(body),
        }
    }

    /// Returns a copy of this response with an extra header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns the body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Serializes the response for the transport.
    ///
    /// Responses with a body get `content-type: application/json` unless a
    /// content type was set explicitly.
    #[must_use]
    pub fn into_http(self) -> http::Response<Bytes> {
        let (bytes, is_json) = match &self.body {
            Some(value) => match serde_json::to_vec(value) {
                Ok(bytes) => (Bytes::from(bytes), true),
                Err(_) => (Bytes::new(), false),
            },
            None => (Bytes::new(), false),
        };

        let mut response = http::Response::new(bytes);
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        for (name, value) in self.headers.entries {
            headers.append(name, value);
        }
        if is_json && !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        response
    }
}

/// One entry of a validation error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorItem {
    /// Location of the failure, starting with the request part
    pub loc: Vec<String>,
    /// Human-readable message
    pub msg: String,
    /// Machine-readable failure kind
    #[serde(rename = "type")]
    pub kind: String,
}

/// The detail of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A single message
    Message(String),
    /// A list of located failures
    Items(Vec<ErrorItem>),
}

/// Error response builder.
///
/// Bodies have the shape `{"detail": ..., "code": "..."}`, where `detail` is
/// either a message or a list of located failures.
///
/// # Example
///
/// ```rust
/// use tollway_extract::ErrorResponse;
/// use http::StatusCode;
///
/// let response = ErrorResponse::not_found("Not Found").into_response();
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// assert_eq!(
///     response.body().map(ToString::to_string).as_deref(),
///     Some(r#"{"detail":"Not Found","code":"NOT_FOUND"}"#)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    status: StatusCode,
    code: String,
    detail: ErrorDetail,
}

impl ErrorResponse {
    /// Creates an error response with a plain message.
    #[must_use]
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            detail: ErrorDetail::Message(message.into()),
        }
    }

    /// Creates a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Creates a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Creates a 405 Method Not Allowed error.
    #[must_use]
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED", message)
    }

    /// Creates a 500 Internal Server Error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    /// Creates an error response for a failed binding.
    #[must_use]
    pub fn from_binding(error: &BindingError) -> Self {
        Self {
            status: error.status_code(),
            code: error.error_code().to_string(),
            detail: ErrorDetail::Items(vec![ErrorItem {
                loc: error.loc(),
                msg: error.message(),
                kind: error.kind().to_string(),
            }]),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the detail.
    #[must_use]
    pub fn detail(&self) -> &ErrorDetail {
        &self.detail
    }

    /// Builds the response.
    #[must_use]
    pub fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorEnvelope {
            detail: ErrorDetail,
            code: String,
        }

        let envelope = ErrorEnvelope {
            detail: self.detail,
            code: self.code,
        };
        let body = Value::from_serialize(&envelope).unwrap_or_default();

        Response::json(self.status, body)
    }
}
