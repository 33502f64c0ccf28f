//! Route table errors.

use http::Method;
use thiserror::Error;

/// Errors raised while building the route table.
///
/// All of these are startup errors: a table that fails to build should abort
/// the application rather than serve a partial set of routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The path pattern could not be parsed.
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// A route with the same method and pattern shape is already registered.
    #[error("duplicate route: {method} {pattern}")]
    DuplicateRoute {
        /// The HTTP method
        method: Method,
        /// The pattern being registered
        pattern: String,
    },
}

impl RouterError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate route error.
    pub fn duplicate(method: &Method, pattern: impl Into<String>) -> Self {
        Self::DuplicateRoute {
            method: method.clone(),
            pattern: pattern.into(),
        }
    }

    /// Returns true if this is a duplicate route error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRoute { .. })
    }
}
