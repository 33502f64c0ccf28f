//! The route table.
//!
//! Registration happens once at startup; afterwards the table is only read.

use http::Method;
use tollway_router::{Params, PathPattern, RouteId, Router};

use crate::error::RegistrationError;
use crate::route::Route;

/// A route matched against a request, with its raw path variables.
#[derive(Debug, Clone)]
pub struct MatchedRoute<'a> {
    /// The id the route was registered under
    pub id: RouteId,
    /// The matched route
    pub route: &'a Route,
    /// Percent-decoded path variables
    pub params: Params,
}

/// Routes keyed by method and path pattern.
///
/// # Example
///
/// ```rust
/// use tollway::{FieldType, ParamSpec, RegistrationError, Route, RouteTable};
/// use http::Method;
///
/// let read_item = || {
///     Route::get("/items/{item_id}")
///         .param(ParamSpec::path("item_id", FieldType::Integer))
///         .handler(|_, _| Ok(()))
/// };
///
/// let mut table = RouteTable::new();
/// table.register(read_item()).unwrap();
///
/// let matched = table.match_route(&Method::GET, "/items/7").unwrap();
/// assert_eq!(matched.params.get("item_id"), Some("7"));
///
/// let err = table.register(read_item()).unwrap_err();
/// assert!(matches!(err, RegistrationError::Duplicate { .. }));
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
    router: Router,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route.
    ///
    /// Fails if the pattern is malformed, if the declared parameters do not
    /// fit the pattern, or if another route has the same method and pattern.
    /// A failed registration leaves the table unchanged.
    pub fn register(&mut self, route: Route) -> Result<RouteId, RegistrationError> {
        let pattern = checked_pattern(&route)?;
        let id = RouteId::new(self.routes.len());
        self.router.insert(route.method(), &pattern, id)?;
        self.push(route, &pattern);
        Ok(id)
    }

    /// Registers several routes as one unit.
    ///
    /// Either every route is registered or, on the first failure, none is.
    pub fn register_all(
        &mut self,
        routes: impl IntoIterator<Item = Route>,
    ) -> Result<Vec<RouteId>, RegistrationError> {
        let mut router = self.router.clone();
        let mut staged = Vec::new();

        for route in routes {
            let pattern = checked_pattern(&route)?;
            let id = RouteId::new(self.routes.len() + staged.len());
            router.insert(route.method(), &pattern, id)?;
            staged.push((id, route, pattern));
        }

        self.router = router;
        Ok(staged
            .into_iter()
            .map(|(id, route, pattern)| {
                self.push(route, &pattern);
                id
            })
            .collect())
    }

    fn push(&mut self, route: Route, pattern: &PathPattern) {
        tracing::debug!(
            http.method = %route.method(),
            route.pattern = %pattern,
            route.name = route.label(),
            "Route registered"
        );
        self.routes.push(route);
    }

    /// Finds the route for a method and concrete path.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<MatchedRoute<'_>> {
        let matched = self.router.match_route(method, path)?;
        let route = self.routes.get(matched.route_id.index())?;
        Some(MatchedRoute {
            id: matched.route_id,
            route,
            params: matched.params,
        })
    }

    /// Returns the methods registered for a concrete path.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.router.allowed_methods(path)
    }

    /// Returns a route by id.
    #[must_use]
    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.index())
    }

    /// Returns an iterator over routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Parses the route's pattern and checks its contract against it.
fn checked_pattern(route: &Route) -> Result<PathPattern, RegistrationError> {
    let pattern = PathPattern::parse(route.pattern())?;
    route
        .contract()
        .check(&pattern)
        .map_err(|source| RegistrationError::Contract {
            route: route.label().to_string(),
            source,
        })?;
    Ok(pattern)
}
