//! Handler and registration errors.

use http::{Method, StatusCode};
use thiserror::Error;
use tollway_extract::{BindingError, ContractError, ErrorResponse, Response};
use tollway_router::RouterError;

/// Error returned by a handler.
///
/// Every variant maps to a status code and a JSON error body.
///
/// # Example
///
/// ```rust
/// use tollway::ApiError;
/// use http::StatusCode;
///
/// let err = ApiError::not_found("item 7 does not exist");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert_eq!(err.to_string(), "item 7 does not exist");
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The request is understood but unacceptable (400).
    #[error("{0}")]
    BadRequest(String),

    /// The request conflicts with current state (409).
    #[error("{0}")]
    Conflict(String),

    /// Any other status with a message.
    #[error("{detail}")]
    Http {
        /// The response status
        status: StatusCode,
        /// The message sent as `detail`
        detail: String,
    },

    /// Request data did not bind.
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// An unexpected failure (500). The message is logged, not sent.
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Creates a 404 error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    /// Creates a 400 error.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }

    /// Creates a 409 error.
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    /// Creates an error with an arbitrary status.
    pub fn http(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: detail.into(),
        }
    }

    /// Wraps an unexpected error.
    pub fn internal(error: impl Into<anyhow::Error>) -> Self {
        Self::Internal(error.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Http { status, .. } => *status,
            Self::Binding(e) => e.status_code(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Binding(e) => e.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Builds the error response.
    #[must_use]
    pub fn to_response(&self) -> Response {
        match self {
            Self::Binding(e) => ErrorResponse::from_binding(e).into_response(),
            Self::Internal(_) => ErrorResponse::internal_error("Internal Server Error").into_response(),
            other => {
                ErrorResponse::new(other.status_code(), other.error_code(), other.to_string())
                    .into_response()
            }
        }
    }
}

/// Error raised when a route cannot be registered.
///
/// These are startup errors; an application that hits one should not serve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The route's pattern is malformed.
    #[error(transparent)]
    Pattern(RouterError),

    /// The route's parameters do not fit its pattern.
    #[error("route '{route}': {source}")]
    Contract {
        /// The route label
        route: String,
        /// What is wrong
        source: ContractError,
    },

    /// Another route already has this method and pattern.
    #[error("duplicate route: {method} {pattern}")]
    Duplicate {
        /// The HTTP method
        method: Method,
        /// The pattern being registered
        pattern: String,
    },
}

impl From<RouterError> for RegistrationError {
    fn from(error: RouterError) -> Self {
        match error {
            RouterError::DuplicateRoute { method, pattern } => Self::Duplicate { method, pattern },
            other => Self::Pattern(other),
        }
    }
}
