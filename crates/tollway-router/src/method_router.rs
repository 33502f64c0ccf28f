//! Per-path method table.
//!
//! Every tree node that terminates a route holds a [`MethodRouter`], which
//! maps each HTTP method to at most one [`Endpoint`].

use http::Method;

use crate::RouteId;

/// A route registered for one method at one path shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The route id
    pub route_id: RouteId,
    /// Variable names of the route's pattern, in order
    pub variables: Vec<String>,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(route_id: RouteId, variables: Vec<String>) -> Self {
        Self {
            route_id,
            variables,
        }
    }
}

/// Maps HTTP methods to endpoints for a single path shape.
///
/// Standard methods get a dedicated slot; extension methods are kept in a
/// small list in registration order.
#[derive(Debug, Clone, Default)]
pub struct MethodRouter {
    get: Option<Endpoint>,
    post: Option<Endpoint>,
    put: Option<Endpoint>,
    delete: Option<Endpoint>,
    patch: Option<Endpoint>,
    head: Option<Endpoint>,
    options: Option<Endpoint>,
    trace: Option<Endpoint>,
    connect: Option<Endpoint>,
    extensions: Vec<(Method, Endpoint)>,
}

impl MethodRouter {
    /// Creates an empty method table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, method: &Method) -> Option<&Option<Endpoint>> {
        match *method {
            Method::GET => Some(&self.get),
            Method::POST => Some(&self.post),
            Method::PUT => Some(&self.put),
            Method::DELETE => Some(&self.delete),
            Method::PATCH => Some(&self.patch),
            Method::HEAD => Some(&self.head),
            Method::OPTIONS => Some(&self.options),
            Method::TRACE => Some(&self.trace),
            Method::CONNECT => Some(&self.connect),
            _ => None,
        }
    }

    fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Endpoint>> {
        match *method {
            Method::GET => Some(&mut self.get),
            Method::POST => Some(&mut self.post),
            Method::PUT => Some(&mut self.put),
            Method::DELETE => Some(&mut self.delete),
            Method::PATCH => Some(&mut self.patch),
            Method::HEAD => Some(&mut self.head),
            Method::OPTIONS => Some(&mut self.options),
            Method::TRACE => Some(&mut self.trace),
            Method::CONNECT => Some(&mut self.connect),
            _ => None,
        }
    }

    /// Registers an endpoint for `method`.
    ///
    /// Returns the endpoint back if the method is already taken.
    pub fn try_insert(&mut self, method: &Method, endpoint: Endpoint) -> Result<(), Endpoint> {
        if let Some(slot) = self.slot_mut(method) {
            if slot.is_some() {
                return Err(endpoint);
            }
            *slot = Some(endpoint);
            return Ok(());
        }

        if self.extensions.iter().any(|(m, _)| m == method) {
            return Err(endpoint);
        }
        self.extensions.push((method.clone(), endpoint));
        Ok(())
    }

    /// Returns the endpoint registered for `method`.
    #[must_use]
    pub fn get(&self, method: &Method) -> Option<&Endpoint> {
        match self.slot(method) {
            Some(slot) => slot.as_ref(),
            None => self
                .extensions
                .iter()
                .find(|(m, _)| m == method)
                .map(|(_, e)| e),
        }
    }

    /// Returns true if an endpoint exists for `method`.
    #[must_use]
    pub fn has_method(&self, method: &Method) -> bool {
        self.get(method).is_some()
    }

    /// Returns the methods that have an endpoint, standard methods first.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        let standard = [
            (&self.get, Method::GET),
            (&self.post, Method::POST),
            (&self.put, Method::PUT),
            (&self.delete, Method::DELETE),
            (&self.patch, Method::PATCH),
            (&self.head, Method::HEAD),
            (&self.options, Method::OPTIONS),
            (&self.trace, Method::TRACE),
            (&self.connect, Method::CONNECT),
        ];

        standard
            .into_iter()
            .filter(|(slot, _)| slot.is_some())
            .map(|(_, method)| method)
            .chain(self.extensions.iter().map(|(m, _)| m.clone()))
            .collect()
    }

    /// Returns true if no endpoint is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed_methods().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(id: usize) -> Endpoint {
        Endpoint::new(RouteId::new(id), Vec::new())
    }

    #[test]
    fn test_insert_and_get() {
        let mut router = MethodRouter::new();
        router.try_insert(&Method::GET, endpoint(0)).unwrap();
        router.try_insert(&Method::POST, endpoint(1)).unwrap();

        assert_eq!(router.get(&Method::GET).map(|e| e.route_id), Some(RouteId::new(0)));
        assert_eq!(router.get(&Method::POST).map(|e| e.route_id), Some(RouteId::new(1)));
        assert!(router.get(&Method::DELETE).is_none());
    }

    #[test]
    fn test_occupied_slot_is_rejected() {
        let mut router = MethodRouter::new();
        router.try_insert(&Method::GET, endpoint(0)).unwrap();
        let rejected = router.try_insert(&Method::GET, endpoint(1)).unwrap_err();
        assert_eq!(rejected.route_id, RouteId::new(1));
        assert_eq!(router.get(&Method::GET).map(|e| e.route_id), Some(RouteId::new(0)));
    }

    #[test]
    fn test_extension_methods() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let mut router = MethodRouter::new();
        router.try_insert(&purge, endpoint(3)).unwrap();
        assert!(router.has_method(&purge));
        assert!(router.try_insert(&purge, endpoint(4)).is_err());
        assert_eq!(router.allowed_methods(), vec![purge]);
    }

    #[test]
    fn test_allowed_methods_order() {
        let mut router = MethodRouter::new();
        assert!(router.is_empty());
        router.try_insert(&Method::DELETE, endpoint(0)).unwrap();
        router.try_insert(&Method::GET, endpoint(1)).unwrap();
        assert_eq!(router.allowed_methods(), vec![Method::GET, Method::DELETE]);
    }
}
