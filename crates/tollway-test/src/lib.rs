//! # Tollway Test
//!
//! In-memory testing for Tollway apps. Requests are dispatched straight into
//! an [`App`](tollway::App); no socket, runtime or port is involved.
//!
//! ## Example
//!
//! ```rust
//! use tollway::{App, Route, ParamSpec, FieldType};
//! use tollway_test::TestClient;
//! use http::StatusCode;
//! use serde_json::json;
//!
//! let mut app = App::new();
//! app.route(
//!     Route::get("/items/{item_id}")
//!         .param(ParamSpec::path("item_id", FieldType::Integer))
//!         .handler(|params, _| Ok(json!({ "item_id": params.i64("item_id") }))),
//! )
//! .unwrap();
//!
//! let client = TestClient::new(app);
//!
//! client
//!     .get("/items/5")
//!     .send()
//!     .assert_status(StatusCode::OK)
//!     .assert_json_eq(&json!({"item_id": 5}));
//!
//! client
//!     .get("/items/foo")
//!     .send()
//!     .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
//!     .assert_json_field("detail.0.loc", &json!(["path", "item_id"]));
//! ```

#![doc(html_root_url = "https://docs.rs/tollway-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
