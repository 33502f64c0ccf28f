//! # Tollway
//!
//! **Typed HTTP routing and validation**
//!
//! Tollway turns a table of declared routes into request handling:
//!
//! - **Routing**: method plus path pattern (`/items/{item_id}`) to a handler,
//!   with 404 and 405 answered automatically
//! - **Binding**: path, query and JSON body parameters are coerced and
//!   validated against declared types before the handler runs
//! - **Responses**: handler results are serialized, optionally checked
//!   against a declared response type, and every failure becomes a
//!   consistent JSON error envelope
//!
//! Tollway does no I/O of its own. Feed it [`RequestParts`] (or an
//! [`http::Request`]) from whatever transport you use.
//!
//! ## Quick Start
//!
//! ```rust
//! use tollway::prelude::*;
//! use http::{Method, StatusCode};
//! use serde_json::json;
//!
//! let mut app = App::new();
//! app.route(
//!     Route::get("/search")
//!         .param(ParamSpec::query("q", FieldType::String))
//!         .param(ParamSpec::query_with_default("limit", FieldType::Integer, 10))
//!         .handler(|params, _| {
//!             Ok(json!({
//!                 "q": params.str("q"),
//!                 "limit": params.i64("limit"),
//!             }))
//!         }),
//! )
//! .unwrap();
//!
//! let request = RequestParts::new(Method::GET, "/search?q=x".parse().unwrap());
//! let response = app.handle(&request);
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(
//!     response.body().map(|b| b.to_json()),
//!     Some(json!({"q": "x", "limit": 10}))
//! );
//!
//! let request = RequestParts::new(Method::GET, "/search".parse().unwrap());
//! assert_eq!(app.handle(&request).status(), StatusCode::UNPROCESSABLE_ENTITY);
//! ```
//!
//! ## Crates
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`core`] | Field types, schemas and the validator |
//! | [`router`] | Path patterns and the routing tree |
//! | [`extract`] | Parameter binding and response building |
//! | [`telemetry`] | Logging and metrics setup |

#![doc(html_root_url = "https://docs.rs/tollway/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod error;
mod group;
mod route;
mod table;

pub use tollway_core as core;
pub use tollway_extract as extract;
pub use tollway_router as router;
pub use tollway_telemetry as telemetry;

pub use app::{App, AppSettings};
pub use error::{ApiError, RegistrationError};
pub use group::RouteGroup;
pub use route::{HandlerFn, Route, RouteBuilder};
pub use table::{MatchedRoute, RouteTable};

pub use tollway_core::{FieldType, Schema, ValidationError, Value};
pub use tollway_extract::{
    BindingError, BoundParams, ContractError, ErrorResponse, ParamSpec, RequestParts, Response,
    ResponseContext,
};
pub use tollway_router::{PathPattern, RouteId};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use tollway::prelude::*;
///
/// let route = Route::get("/").handler(|_, _| Ok("ok"));
/// assert_eq!(route.pattern(), "/");
/// ```
pub mod prelude {
    pub use crate::{
        ApiError, App, AppSettings, BoundParams, FieldType, ParamSpec, RequestParts, Response,
        ResponseContext, Route, RouteGroup, Schema, Value,
    };
}
