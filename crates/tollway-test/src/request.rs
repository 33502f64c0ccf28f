//! Test request building.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde::Serialize;
use tollway::RequestParts;

use crate::error::TestError;

/// A built test request.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// HTTP method
    pub method: Method,
    /// Request URI, query string included
    pub uri: Uri,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
}

impl TestRequest {
    /// Starts a GET request.
    pub fn get(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, uri)
    }

    /// Starts a POST request.
    pub fn post(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, uri)
    }

    /// Starts a PUT request.
    pub fn put(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, uri)
    }

    /// Starts a PATCH request.
    pub fn patch(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, uri)
    }

    /// Starts a DELETE request.
    pub fn delete(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, uri)
    }

    /// Converts this request into the parts an app dispatches on.
    #[must_use]
    pub fn into_parts(self) -> RequestParts {
        let mut parts = RequestParts::new(self.method, self.uri).with_body(self.body);
        for (name, value) in &self.headers {
            parts = parts.with_header(name.clone(), value.clone());
        }
        parts
    }
}

/// Builder for test requests.
///
/// Setter failures (a bad header, a value that does not serialize) are kept
/// and reported by [`build`](Self::build).
#[must_use]
#[derive(Debug)]
pub struct TestRequestBuilder {
    method: Method,
    uri: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<Bytes>,
    error: Option<TestError>,
}

impl TestRequestBuilder {
    /// Creates a request builder.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Appends a query parameter. Keys and values are percent-encoded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollway_test::TestRequest;
    ///
    /// let request = TestRequest::get("/search")
    ///     .query("q", "rust & tea")
    ///     .query("tags", "a")
    ///     .query("tags", "b")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(request.uri.query(), Some("q=rust%20%26%20tea&tags=a&tags=b"));
    /// ```
    pub fn query(mut self, key: impl AsRef<str>, value: impl ToString) -> Self {
        self.query.push((key.as_ref().to_string(), value.to_string()));
        self
    }

    /// Sets a header on the request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        match (
            HeaderName::try_from(name),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => self.fail(TestError::InvalidHeader(name.to_string())),
        }
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body as JSON and the Content-Type to
    /// `application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Some(Bytes::from(bytes)),
            Err(e) => self.fail(TestError::Json(e)),
        }
        self.content_type("application/json")
    }

    /// Builds the request.
    pub fn build(self) -> Result<TestRequest, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut target = self.uri;
        if !self.query.is_empty() {
            let encoded = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            target.push(if target.contains('?') { '&' } else { '?' });
            target.push_str(&encoded);
        }

        let uri: Uri = target
            .parse()
            .map_err(|e| TestError::RequestBuild(format!("Invalid URI: {e}")))?;

        Ok(TestRequest {
            method: self.method,
            uri,
            headers: self.headers,
            body: self.body.unwrap_or_default(),
        })
    }

    fn fail(&mut self, error: TestError) {
        self.error.get_or_insert(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_methods() {
        assert_eq!(TestRequest::get("/").build().unwrap().method, Method::GET);
        assert_eq!(TestRequest::post("/").build().unwrap().method, Method::POST);
        assert_eq!(TestRequest::put("/").build().unwrap().method, Method::PUT);
        assert_eq!(TestRequest::patch("/").build().unwrap().method, Method::PATCH);
        assert_eq!(TestRequest::delete("/").build().unwrap().method, Method::DELETE);
    }

    #[test]
    fn test_query_appends_to_existing() {
        let request = TestRequest::get("/search?q=x").query("limit", 5).build().unwrap();
        assert_eq!(request.uri.path(), "/search");
        assert_eq!(request.uri.query(), Some("q=x&limit=5"));
    }

    #[test]
    fn test_json_body() {
        let request = TestRequest::post("/items")
            .json(&json!({"name": "Foo"}))
            .build()
            .unwrap();

        assert_eq!(request.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(request.body.as_ref(), br#"{"name":"Foo"}"#);
    }

    #[test]
    fn test_invalid_header_reported_at_build() {
        let result = TestRequest::get("/").header("bad header", "x").build();
        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_uri() {
        let result = TestRequest::get("not a uri").build();
        assert!(matches!(result, Err(TestError::RequestBuild(_))));
    }

    #[test]
    fn test_into_parts() {
        let parts = TestRequest::post("/items?x=1")
            .header("X-Trace", "abc")
            .body("{}")
            .build()
            .unwrap()
            .into_parts();

        assert_eq!(parts.method(), &Method::POST);
        assert_eq!(parts.path(), "/items");
        assert_eq!(parts.query(), Some("x=1"));
        assert_eq!(parts.header("x-trace"), Some("abc"));
        assert_eq!(parts.body().as_ref(), b"{}");
    }
}
