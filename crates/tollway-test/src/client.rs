//! Test client for in-memory dispatch.

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use serde::Serialize;
use tollway::App;

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::TestResponse;

/// Sends requests straight into an [`App`] without a network.
///
/// Requests go through exactly the path a transport would use
/// ([`App::handle_http`]), so routing, binding, response validation and
/// error envelopes all behave as in production.
///
/// # Example
///
/// ```rust
/// use tollway::{App, Route};
/// use tollway_test::TestClient;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let mut app = App::new();
/// app.route(Route::get("/").handler(|_, _| Ok(json!({"message": "Hello World"}))))
///     .unwrap();
///
/// let client = TestClient::new(app);
/// client
///     .get("/")
///     .send()
///     .assert_status(StatusCode::OK)
///     .assert_json_eq(&json!({"message": "Hello World"}));
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TestClient {
    app: Arc<App>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client for `app`.
    pub fn new(app: App) -> Self {
        Self::from_shared(Arc::new(app))
    }

    /// Creates a client for an app that is shared elsewhere.
    pub fn from_shared(app: Arc<App>) -> Self {
        Self {
            app,
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Returns the app under test.
    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Starts a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::get(uri))
    }

    /// Starts a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::post(uri))
    }

    /// Starts a PUT request.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::put(uri))
    }

    /// Starts a PATCH request.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::patch(uri))
    }

    /// Starts a DELETE request.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::delete(uri))
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, uri))
    }

    /// Dispatches a built request.
    pub fn dispatch(&self, request: TestRequest) -> TestResponse {
        let mut builder = http::Request::builder().method(request.method).uri(request.uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers);
        }

        match builder.body(request.body) {
            Ok(request) => TestResponse::from(self.app.handle_http(request)),
            Err(e) => panic!("invalid test request: {e}"),
        }
    }
}

/// A request builder bound to a [`TestClient`].
#[must_use]
#[derive(Debug)]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl<'a> TestClientRequest<'a> {
    fn new(client: &'a TestClient, builder: TestRequestBuilder) -> Self {
        let builder = client
            .default_headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));
        Self { client, builder }
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl AsRef<str>, value: impl ToString) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built; use
    /// [`try_send`](Self::try_send) to handle that case.
    pub fn send(self) -> TestResponse {
        match self.try_send() {
            Ok(response) => response,
            Err(e) => panic!("failed to build test request: {e}"),
        }
    }

    /// Sends the request, returning build errors.
    pub fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        Ok(self.client.dispatch(request))
    }
}
