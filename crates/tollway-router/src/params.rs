//! Captured path variables.
//!
//! Values are percent-decoded segments of the request path. Type coercion
//! happens later, during parameter binding.

use smallvec::SmallVec;

/// Number of variables stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Captured path variables of a route match, in pattern order.
///
/// # Example
///
/// ```rust
/// use tollway_router::Params;
///
/// let mut params = Params::new();
/// params.push("org", "acme");
/// params.push("item_id", "42");
///
/// assert_eq!(params.get("item_id"), Some("42"));
/// assert_eq!(params.get("unknown"), None);
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["org", "item_id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured variable.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns the variable names in pattern order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|(n, _)| n.as_str())
    }

    /// Returns an iterator over `(name, raw value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N, V> FromIterator<(N, V)> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}
