//! Validation errors.

use thiserror::Error;

/// The first failure found while validating a value.
///
/// `path` locates the failing field inside the validated value using dotted
/// field names and bracketed list indices (`owner.name`, `tags[2]`). Errors for
/// the value itself have an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The raw value cannot be coerced to the declared type.
    #[error("{}expected {expected}, got {found}", at(.path))]
    TypeMismatch {
        /// Location of the failing value
        path: String,
        /// Description of the declared type
        expected: String,
        /// Description of what was found instead
        found: String,
    },

    /// A required field is absent and has no default.
    #[error("{}field required", at(.path))]
    MissingField {
        /// Location of the missing field
        path: String,
    },
}

fn at(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{path}: ")
    }
}

impl ValidationError {
    /// Creates a type mismatch error.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    /// Returns the location of the failure.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::TypeMismatch { path, .. } | Self::MissingField { path } => path,
        }
    }

    /// Returns the path split into its components.
    ///
    /// `owner.tags[1]` becomes `["owner", "tags", "1"]`.
    #[must_use]
    pub fn path_segments(&self) -> Vec<String> {
        self.path()
            .split(['.', '['])
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches(']').to_string())
            .collect()
    }

    /// Returns a stable machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::MissingField { .. } => "missing_field",
        }
    }

    /// Returns a message without the location prefix.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::TypeMismatch {
                expected, found, ..
            } => format!("expected {expected}, got {found}"),
            Self::MissingField { .. } => "field required".to_string(),
        }
    }

    /// Replaces the location of the failure.
    #[must_use]
    pub fn with_path(mut self, new_path: impl Into<String>) -> Self {
        match &mut self {
            Self::TypeMismatch { path, .. } | Self::MissingField { path } => *path = new_path.into(),
        }
        self
    }

    /// Re-roots the error under `prefix`.
    ///
    /// ```rust
    /// use tollway_core::ValidationError;
    ///
    /// let err = ValidationError::missing_field("name").within("owner");
    /// assert_eq!(err.path(), "owner.name");
    ///
    /// let err = ValidationError::type_mismatch("[0]", "integer", "string").within("ids");
    /// assert_eq!(err.path(), "ids[0]");
    /// ```
    #[must_use]
    pub fn within(mut self, prefix: &str) -> Self {
        let path = match &mut self {
            Self::TypeMismatch { path, .. } | Self::MissingField { path } => path,
        };
        *path = if path.is_empty() {
            prefix.to_string()
        } else if path.starts_with('[') || prefix.is_empty() {
            format!("{prefix}{path}")
        } else {
            format!("{prefix}.{path}")
        };
        self
    }
}
