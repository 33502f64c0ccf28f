//! Path pattern parsing.
//!
//! A pattern is an ordered list of literal and variable segments, written as
//! `/items/{item_id}/tags`. Empty segments are dropped, so `/items/` and
//! `/items` describe the same pattern.

use std::fmt;
use std::str::FromStr;

use crate::error::RouterError;

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must match the request segment verbatim
    Literal(String),
    /// Captures the request segment under the given name
    Variable(String),
}

impl Segment {
    /// Returns the variable name, if this is a variable segment.
    #[must_use]
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Variable(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// A parsed route path pattern.
///
/// # Example
///
/// ```rust
/// use tollway_router::{PathPattern, Segment};
///
/// let pattern = PathPattern::parse("/items/{item_id}").unwrap();
/// assert_eq!(pattern.segments().len(), 2);
/// assert_eq!(pattern.segments()[1], Segment::Variable("item_id".to_string()));
/// assert_eq!(pattern.variables().collect::<Vec<_>>(), vec!["item_id"]);
/// assert_eq!(pattern.to_string(), "/items/{item_id}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// The root pattern `/`.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let mut segments = Vec::new();

        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            let segment = parse_segment(pattern, raw)?;
            if let Segment::Variable(name) = &segment {
                if segments.iter().any(|s: &Segment| s.variable() == Some(name.as_str())) {
                    return Err(RouterError::invalid_pattern(
                        pattern,
                        format!("variable '{name}' appears more than once"),
                    ));
                }
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the variable names in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::variable)
    }

    /// Returns true if this is the root pattern.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new pattern with `self` as prefix and `suffix` appended.
    ///
    /// Fails if the combined pattern would repeat a variable name.
    pub fn join(&self, suffix: &PathPattern) -> Result<Self, RouterError> {
        let mut segments = self.segments.clone();
        for segment in &suffix.segments {
            if let Some(name) = segment.variable() {
                if self.variables().any(|v| v == name) {
                    return Err(RouterError::invalid_pattern(
                        format!("{self}{suffix}"),
                        format!("variable '{name}' appears more than once"),
                    ));
                }
            }
            segments.push(segment.clone());
        }
        Ok(Self { segments })
    }

    /// Returns true if both patterns have the same shape.
    ///
    /// Shapes ignore variable names: `/items/{id}` and `/items/{item_id}`
    /// match exactly the same set of paths.
    #[must_use]
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Variable(_), Segment::Variable(_)) => true,
                    _ => false,
                })
    }
}

fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, RouterError> {
    if let Some(inner) = raw.strip_prefix('{') {
        let name = inner
            .strip_suffix('}')
            .ok_or_else(|| RouterError::invalid_pattern(pattern, "unclosed variable"))?;
        if name.is_empty() {
            return Err(RouterError::invalid_pattern(pattern, "empty variable name"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RouterError::invalid_pattern(
                pattern,
                format!("invalid variable name '{name}'"),
            ));
        }
        return Ok(Segment::Variable(name.to_string()));
    }

    if raw.contains(['{', '}']) {
        return Err(RouterError::invalid_pattern(
            pattern,
            format!("braces must wrap a whole segment, found '{raw}'"),
        ));
    }

    Ok(Segment::Literal(raw.to_string()))
}

impl FromStr for PathPattern {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        let pattern = PathPattern::parse("/items/list").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("items".to_string()),
                Segment::Literal("list".to_string())
            ]
        );
        assert_eq!(pattern.variables().count(), 0);
    }

    #[test]
    fn test_parse_root_and_trailing_slash() {
        assert!(PathPattern::parse("/").unwrap().is_root());
        assert!(PathPattern::parse("").unwrap().is_root());
        assert_eq!(
            PathPattern::parse("/items/").unwrap(),
            PathPattern::parse("/items").unwrap()
        );
        assert_eq!(PathPattern::root().to_string(), "/");
    }

    #[test]
    fn test_parse_rejects_malformed_variables() {
        assert!(PathPattern::parse("/items/{").is_err());
        assert!(PathPattern::parse("/items/{}").is_err());
        assert!(PathPattern::parse("/items/{a-b}").is_err());
        assert!(PathPattern::parse("/items/x{id}").is_err());
        assert!(PathPattern::parse("/a/{id}/b/{id}").is_err());
    }

    #[test]
    fn test_join() {
        let prefix = PathPattern::parse("/items").unwrap();
        let joined = prefix.join(&PathPattern::parse("/{item_id}").unwrap()).unwrap();
        assert_eq!(joined.to_string(), "/items/{item_id}");

        let joined = prefix.join(&PathPattern::root()).unwrap();
        assert_eq!(joined.to_string(), "/items");

        let prefix = PathPattern::parse("/orgs/{id}").unwrap();
        assert!(prefix.join(&PathPattern::parse("/{id}").unwrap()).is_err());
    }

    #[test]
    fn test_same_shape() {
        let a = PathPattern::parse("/items/{id}").unwrap();
        let b = PathPattern::parse("/items/{item_id}").unwrap();
        let c = PathPattern::parse("/items/me").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }
}
