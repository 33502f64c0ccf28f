//! Inbound request data.
//!
//! [`RequestParts`] is the raw material the binder works from: method, URI,
//! headers and body bytes as handed over by the transport.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde::Serialize;

use crate::error::BindingError;
use crate::query::RawQuery;

/// The raw parts of an inbound request.
///
/// # Example
///
/// ```rust
/// use tollway_extract::RequestParts;
/// use http::{Method, Uri};
///
/// let request = RequestParts::new(Method::GET, Uri::from_static("/search?q=foo"));
///
/// assert_eq!(request.path(), "/search");
/// assert_eq!(request.query(), Some("q=foo"));
/// assert_eq!(request.raw_query().unwrap().last("q"), Some("foo"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestParts {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestParts {
    /// Creates a request with no headers and an empty body.
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Serializes `value` as the JSON body and sets the content type.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Bytes::from(serde_json::to_vec(value)?);
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the raw query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Decodes the query string.
    pub fn raw_query(&self) -> Result<RawQuery, BindingError> {
        self.query().map_or_else(|| Ok(RawQuery::default()), RawQuery::parse)
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl From<http::Request<Bytes>> for RequestParts {
    fn from(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_without_query() {
        let request = RequestParts::new(Method::GET, Uri::from_static("/"));
        assert_eq!(request.query(), None);
        assert!(request.raw_query().unwrap().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_with_json() {
        let request = RequestParts::new(Method::POST, Uri::from_static("/items"))
            .with_json(&json!({"name": "pen"}))
            .unwrap();
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body().as_ref(), br#"{"name":"pen"}"#);
    }

    #[test]
    fn test_from_http_request() {
        let request = http::Request::builder()
            .method(Method::PUT)
            .uri("/items/1?x=2")
            .header("x-trace", "abc")
            .body(Bytes::from_static(b"{}"))
            .unwrap();

        let parts = RequestParts::from(request);
        assert_eq!(parts.method(), &Method::PUT);
        assert_eq!(parts.path(), "/items/1");
        assert_eq!(parts.header("x-trace"), Some("abc"));
        assert_eq!(parts.body().as_ref(), b"{}");
    }
}
