//! Route groups.

use tollway_router::PathPattern;

use crate::error::RegistrationError;
use crate::route::Route;

/// A set of routes mounted together under a prefix.
///
/// Patterns inside a group are relative; [`App::include`](crate::App::include)
/// prepends the mount prefix to each of them.
///
/// # Example
///
/// ```rust
/// use tollway::{App, FieldType, ParamSpec, Route, RouteGroup};
///
/// let items = RouteGroup::new()
///     .route(Route::get("/").handler(|_, _| Ok(["a", "b"])))
///     .route(
///         Route::get("/{item_id}")
///             .param(ParamSpec::path("item_id", FieldType::Integer))
///             .handler(|_, _| Ok(())),
///     );
///
/// let mut app = App::new();
/// app.include("/items", items).unwrap();
///
/// let patterns: Vec<_> = app.routes().iter().map(|r| r.pattern()).collect();
/// assert_eq!(patterns, vec!["/items", "/items/{item_id}"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteGroup {
    routes: Vec<Route>,
}

impl RouteGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Nests `group` under `prefix` inside this group.
    pub fn include(mut self, prefix: &str, group: RouteGroup) -> Result<Self, RegistrationError> {
        let prefix = PathPattern::parse(prefix)?;
        for route in group.routes {
            self.routes.push(route.prefixed(&prefix)?);
        }
        Ok(self)
    }

    /// Returns the routes in insertion order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the group has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_groups() {
        let detail = RouteGroup::new().route(Route::get("/{item_id}").handler(|_, _| Ok(())));
        let group = RouteGroup::new()
            .route(Route::get("/").handler(|_, _| Ok(())))
            .include("/v2", detail)
            .unwrap();

        assert_eq!(group.len(), 2);
        assert_eq!(group.routes()[1].pattern(), "/v2/{item_id}");
    }

    #[test]
    fn test_invalid_prefix() {
        let err = RouteGroup::new().include("/{", RouteGroup::new()).unwrap_err();
        assert!(matches!(err, RegistrationError::Pattern(_)));
    }
}
