//! High-level router API.
//!
//! [`Router`] is the matching half of the route table: it stores route ids
//! keyed by method and pattern shape, and resolves request paths to them.

use http::Method;

use crate::error::RouterError;
use crate::method_router::Endpoint;
use crate::node::{split_path, Captures, Node};
use crate::params::Params;
use crate::pattern::PathPattern;
use crate::{RouteId, RouteMatch};

/// A radix tree router.
///
/// # Example
///
/// ```rust
/// use tollway_router::{PathPattern, RouteId, Router};
/// use http::Method;
///
/// let mut router = Router::new();
/// let search = PathPattern::parse("/search").unwrap();
/// router.insert(&Method::GET, &search, RouteId::new(0)).unwrap();
///
/// assert!(router.match_route(&Method::GET, "/search").is_some());
/// assert!(router.match_route(&Method::POST, "/search").is_none());
/// assert_eq!(router.allowed_methods("/search"), vec![Method::GET]);
/// ```
///
/// # Route Priority
///
/// A concrete path may fit several shapes. Literal segments are tried before
/// variable segments, depth first, and the first shape that has an endpoint
/// for the request method wins. `/items/latest` therefore beats
/// `/items/{item_id}` for the path `/items/latest`, while any other
/// `/items/...` path falls through to the variable route.
#[derive(Debug, Clone, Default)]
pub struct Router {
    root: Node,
    route_count: usize,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `route_id` for `method` at `pattern`.
    ///
    /// Fails with [`RouterError::DuplicateRoute`] if a route with the same
    /// method and pattern shape already exists. Nothing is modified on failure.
    pub fn insert(
        &mut self,
        method: &Method,
        pattern: &PathPattern,
        route_id: RouteId,
    ) -> Result<(), RouterError> {
        let endpoint = Endpoint::new(route_id, pattern.variables().map(String::from).collect());

        self.root
            .entry(pattern.segments())
            .try_insert(method, endpoint)
            .map_err(|_| RouterError::duplicate(method, pattern.to_string()))?;

        self.route_count += 1;
        Ok(())
    }

    /// Matches a request method and path.
    ///
    /// Returns `None` when no route fits; this is a normal outcome, not an error.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let segments = split_path(path);
        let mut captures = Captures::new();
        let mut found = None;

        self.root.walk(&segments, &mut captures, &mut |methods, values| {
            match methods.get(method) {
                Some(endpoint) => {
                    found = Some(RouteMatch::new(endpoint.route_id, bind_names(endpoint, values)));
                    true
                }
                None => false,
            }
        });

        found
    }

    /// Returns every method that has a route matching `path`.
    ///
    /// An empty result means the path itself is unknown.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let segments = split_path(path);
        let mut captures = Captures::new();
        let mut allowed: Vec<Method> = Vec::new();

        self.root.walk(&segments, &mut captures, &mut |methods, _| {
            for method in methods.allowed_methods() {
                if !allowed.contains(&method) {
                    allowed.push(method);
                }
            }
            false
        });

        allowed
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}

fn bind_names(endpoint: &Endpoint, values: &Captures<'_>) -> Params {
    endpoint
        .variables
        .iter()
        .map(String::as_str)
        .zip(values.iter().copied())
        .collect()
}
