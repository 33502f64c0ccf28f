//! Radix tree route table for Tollway.
//!
//! This crate owns the matching half of the route table: it maps a
//! `(method, path pattern)` pair to a [`RouteId`] and resolves concrete request
//! paths back to that id together with the captured path variables.
//!
//! # Features
//!
//! - **Radix Tree Matching**: lookup cost grows with path depth, not route count
//! - **Path Variables**: named variable segments (`/items/{item_id}`)
//! - **Method-Based Routing**: one route per method at each path shape
//! - **Fail-Fast Registration**: duplicate `(method, pattern)` pairs are rejected
//!
//! # Example
//!
//! ```rust
//! use tollway_router::{PathPattern, RouteId, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//!
//! let items = PathPattern::parse("/items").unwrap();
//! let item = PathPattern::parse("/items/{item_id}").unwrap();
//! router.insert(&Method::GET, &items, RouteId::new(0)).unwrap();
//! router.insert(&Method::GET, &item, RouteId::new(1)).unwrap();
//!
//! let matched = router.match_route(&Method::GET, "/items/42").unwrap();
//! assert_eq!(matched.route_id, RouteId::new(1));
//! assert_eq!(matched.params.get("item_id"), Some("42"));
//!
//! // The same shape and method cannot be registered twice.
//! assert!(router.insert(&Method::GET, &item, RouteId::new(2)).is_err());
//! ```
//!
//! # Architecture
//!
//! Each tree node represents one path segment. Literal segments hang off a
//! sorted child list; every variable segment at a position shares a single
//! variable child, so `/items/{id}` and `/items/{item_id}` are the same shape.
//! Variable names live with each registered endpoint and are applied to the
//! captured values positionally once a route is found:
//!
//! ```text
//!                    (root)
//!                      │
//!                   "items"
//!                      │
//!              ┌───────┴───────┐
//!              │               │
//!           (leaf)          "{ }"
//!         [GET,POST]           │
//!                           (leaf)
//!                      [GET item_id]
//! ```

mod error;
mod method_router;
mod node;
mod params;
mod pattern;
mod router;

pub use error::RouterError;
pub use method_router::{Endpoint, MethodRouter};
pub use params::Params;
pub use pattern::{PathPattern, Segment};
pub use router::Router;

use std::fmt;

/// Identifier of a registered route.
///
/// The router does not own routes; callers keep them in their own storage and
/// use the id as an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
    /// Creates a route id from an index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A matched route with its id and captured path variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The id of the matched route
    pub route_id: RouteId,
    /// Captured path variables, in pattern order
    pub params: Params,
}

impl RouteMatch {
    /// Creates a new route match.
    #[must_use]
    pub fn new(route_id: RouteId, params: Params) -> Self {
        Self { route_id, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn pattern(s: &str) -> PathPattern {
        PathPattern::parse(s).unwrap()
    }

    #[test]
    fn test_basic_routing() {
        let mut router = Router::new();
        router.insert(&Method::GET, &pattern("/"), RouteId::new(0)).unwrap();
        router
            .insert(&Method::GET, &pattern("/hello/{name}"), RouteId::new(1))
            .unwrap();

        let m = router.match_route(&Method::GET, "/").unwrap();
        assert_eq!(m.route_id, RouteId::new(0));
        assert!(m.params.is_empty());

        let m = router.match_route(&Method::GET, "/hello/World").unwrap();
        assert_eq!(m.route_id, RouteId::new(1));
        assert_eq!(m.params.get("name"), Some("World"));
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let mut router = Router::new();
        let item = pattern("/items/{item_id}");
        router.insert(&Method::GET, &item, RouteId::new(0)).unwrap();

        let err = router.insert(&Method::GET, &item, RouteId::new(1)).unwrap_err();
        assert!(matches!(err, RouterError::DuplicateRoute { .. }));
        assert_eq!(err.to_string(), "duplicate route: GET /items/{item_id}");
    }

    #[test]
    fn test_route_id_display() {
        assert_eq!(RouteId::new(7).to_string(), "#7");
        assert_eq!(RouteId::new(7).index(), 7);
    }
}
