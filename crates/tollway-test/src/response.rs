//! Test response wrapper.

use std::fmt;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// A response captured by [`TestClient`](crate::TestClient), with assertion
/// helpers.
///
/// The assertion methods panic with a readable message and return `&Self`
/// so they can be chained.
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Creates a test response from raw parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns true if the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a string.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Deserializes the body as a JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected}, got {} with body {}",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the header doesn't exist or doesn't match.
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let expected = expected.as_ref();
        let actual = self
            .header_str(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found"));
        assert_eq!(actual, expected, "Header '{name}': expected '{expected}', got '{actual}'");
        self
    }

    /// Asserts that a header is absent.
    ///
    /// # Panics
    ///
    /// Panics if the header is present.
    pub fn assert_no_header(&self, name: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        assert!(self.header(name).is_none(), "Header '{name}' should be absent");
        self
    }

    /// Asserts that the body is empty.
    ///
    /// # Panics
    ///
    /// Panics if the body has content.
    pub fn assert_empty_body(&self) -> &Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body, got {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts that the JSON body equals `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON or doesn't match.
    pub fn assert_json_eq(&self, expected: &serde_json::Value) -> &Self {
        let actual = self.parsed();
        assert_eq!(&actual, expected, "JSON body mismatch");
        self
    }

    /// Asserts that a JSON field equals `expected`.
    ///
    /// `path` is dot-separated; numeric segments index arrays, so
    /// `detail.0.loc` is the `loc` of the first error item.
    ///
    /// # Panics
    ///
    /// Panics if the field doesn't exist or doesn't match.
    pub fn assert_json_field(&self, path: impl AsRef<str>, expected: &serde_json::Value) -> &Self {
        let path = path.as_ref();
        let json = self.parsed();
        let actual = json_path(&json, path)
            .unwrap_or_else(|| panic!("JSON path '{path}' not found in: {json}"));
        assert_eq!(actual, expected, "JSON field '{path}'");
        self
    }

    /// Asserts the error envelope code.
    ///
    /// # Panics
    ///
    /// Panics if the body has no `code` or it doesn't match.
    pub fn assert_error_code(&self, expected: &str) -> &Self {
        self.assert_json_field("code", &serde_json::Value::from(expected))
    }

    fn parsed(&self) -> serde_json::Value {
        self.json_value()
            .unwrap_or_else(|e| panic!("Body should be valid JSON ({e}): {}", String::from_utf8_lossy(&self.body)))
    }
}

impl From<http::Response<Bytes>> for TestResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self::new(parts.status, parts.headers, body)
    }
}

impl fmt::Debug for TestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

fn json_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match segment.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(segment),
        })
}
