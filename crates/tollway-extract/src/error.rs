//! Binding and contract errors.
//!
//! [`BindingError`] is raised per request when request data does not satisfy a
//! route's declared parameters. [`ContractError`] is raised once, at startup,
//! when a route's declared parameters are inconsistent with its pattern.

use std::fmt;

use http::StatusCode;
use thiserror::Error;
use tollway_core::ValidationError;

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// Path variables (e.g., `/items/{item_id}`)
    Path,
    /// Query string parameters
    Query,
    /// The JSON request body
    Body,
}

impl ParamSource {
    /// Returns the lowercase name used in error locations.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error that occurs while binding a request to a route's parameters.
///
/// # Example
///
/// ```rust
/// use tollway_extract::{BindingError, ParamSource};
/// use http::StatusCode;
///
/// let err = BindingError::missing(ParamSource::Query, "q");
/// assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
/// assert_eq!(err.error_code(), "MISSING_PARAMETER");
/// assert_eq!(err.loc(), vec!["query", "q"]);
/// assert_eq!(err.to_string(), "missing required query parameter 'q'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A required parameter is absent.
    #[error("missing required {location} parameter '{name}'")]
    MissingParameter {
        /// Where the parameter should have been
        location: ParamSource,
        /// The parameter name
        name: String,
    },

    /// A parameter is present but does not validate.
    #[error("invalid {location} parameter '{name}': {error}")]
    Invalid {
        /// Where the parameter was read from
        location: ParamSource,
        /// The parameter name
        name: String,
        /// The validation failure
        #[source]
        error: ValidationError,
    },

    /// The query string could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(String),

    /// The request body is not valid JSON.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The request body exceeds the configured limit.
    #[error("request body of {actual} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge {
        /// The configured limit
        limit: usize,
        /// The actual body size
        actual: usize,
    },
}

impl BindingError {
    /// Creates a missing parameter error.
    pub fn missing(location: ParamSource, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            location,
            name: name.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid(location: ParamSource, name: impl Into<String>, error: ValidationError) -> Self {
        Self::Invalid {
            location,
            name: name.into(),
            error,
        }
    }

    /// Returns where the failing parameter was read from.
    #[must_use]
    pub fn location(&self) -> ParamSource {
        match self {
            Self::MissingParameter { location, .. } | Self::Invalid { location, .. } => *location,
            Self::MalformedQuery(_) => ParamSource::Query,
            Self::MalformedBody(_) | Self::PayloadTooLarge { .. } => ParamSource::Body,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter { .. } | Self::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MalformedQuery(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "MISSING_PARAMETER",
            Self::Invalid { .. } => "INVALID_PARAMETER",
            Self::MalformedQuery(_) => "MALFORMED_QUERY",
            Self::MalformedBody(_) => "MALFORMED_BODY",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }

    /// Returns the failure kind used in error detail items.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "missing",
            Self::Invalid { error, .. } => error.kind(),
            Self::MalformedQuery(_) => "query_invalid",
            Self::MalformedBody(_) => "json_invalid",
            Self::PayloadTooLarge { .. } => "payload_too_large",
        }
    }

    /// Returns the location of the failure as path components.
    ///
    /// Body errors are located relative to the body itself, since a route has
    /// at most one body parameter.
    #[must_use]
    pub fn loc(&self) -> Vec<String> {
        let mut loc = vec![self.location().to_string()];
        match self {
            Self::MissingParameter {
                location: ParamSource::Body,
                ..
            } => {}
            Self::MissingParameter { name, .. } => loc.push(name.clone()),
            Self::Invalid {
                location: ParamSource::Body,
                error,
                ..
            } => loc.extend(error.path_segments()),
            Self::Invalid { name, error, .. } => {
                loc.push(name.clone());
                loc.extend(error.path_segments());
            }
            _ => {}
        }
        loc
    }

    /// Returns a short human-readable message without the location.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MissingParameter { .. } => "field required".to_string(),
            Self::Invalid { error, .. } => error.reason(),
            other => other.to_string(),
        }
    }
}

/// A route's declared parameters are inconsistent with its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A path parameter names a variable the pattern does not have.
    #[error("path parameter '{name}' does not appear in pattern '{pattern}'")]
    UnknownPathParameter {
        /// The parameter name
        name: String,
        /// The route pattern
        pattern: String,
    },

    /// A pattern variable has no declared path parameter.
    #[error("path variable '{name}' in pattern '{pattern}' has no declared parameter")]
    UndeclaredPathVariable {
        /// The variable name
        name: String,
        /// The route pattern
        pattern: String,
    },

    /// A path parameter has a type a single segment cannot hold.
    #[error("path parameter '{name}' must have a scalar type, found {ty}")]
    NonScalarPathParameter {
        /// The parameter name
        name: String,
        /// The declared type
        ty: String,
    },

    /// A query parameter has a type a flat query string cannot hold.
    #[error("query parameter '{name}' cannot have type {ty}")]
    UnsupportedQueryType {
        /// The parameter or query object field name
        name: String,
        /// The declared type
        ty: String,
    },

    /// Two parameters share a name.
    #[error("parameter '{0}' is declared more than once")]
    DuplicateParameter(String),

    /// More than one body parameter.
    #[error("at most one body parameter may be declared, found '{first}' and '{second}'")]
    MultipleBodies {
        /// The first body parameter
        first: String,
        /// The second body parameter
        second: String,
    },

    /// More than one bundled query object.
    #[error("at most one query object may be declared, found '{first}' and '{second}'")]
    MultipleQueryObjects {
        /// The first query object
        first: String,
        /// The second query object
        second: String,
    },

    /// A bundled query object is mixed with individual query parameters.
    #[error("query object '{object}' cannot be combined with query parameter '{param}'")]
    MixedQueryStyles {
        /// The query object parameter
        object: String,
        /// The individual query parameter
        param: String,
    },
}
