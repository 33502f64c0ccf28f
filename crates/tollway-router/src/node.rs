//! Radix tree node implementation.
//!
//! Literal children are kept sorted for binary search. All variable segments
//! at a given depth share one child, since a variable matches any segment
//! regardless of its name.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::method_router::MethodRouter;
use crate::pattern::Segment;

/// Decoded segment values captured along the current search path.
pub(crate) type Captures<'p> = SmallVec<[&'p str; 4]>;

/// A node in the radix tree.
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    /// Literal text of this node (empty for the root and variable nodes)
    segment: String,

    /// Methods registered at this node, if any route ends here
    methods: Option<MethodRouter>,

    /// Literal children, sorted by segment
    static_children: Vec<Node>,

    /// Variable child (at most one per node)
    param_child: Option<Box<Node>>,
}

impl Node {
    fn new_static(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            ..Self::default()
        }
    }

    /// Returns the method table at the end of `segments`, creating nodes as needed.
    pub(crate) fn entry(&mut self, segments: &[Segment]) -> &mut MethodRouter {
        let Some((first, rest)) = segments.split_first() else {
            return self.methods.get_or_insert_with(MethodRouter::new);
        };

        let child = match first {
            Segment::Literal(text) => {
                let index = match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(text))
                {
                    Ok(index) => index,
                    Err(index) => {
                        self.static_children.insert(index, Node::new_static(text));
                        index
                    }
                };
                &mut self.static_children[index]
            }
            Segment::Variable(_) => &mut **self.param_child.get_or_insert_with(Box::default),
        };

        child.entry(rest)
    }

    /// Walks every node that matches `segments` exactly.
    ///
    /// Literal children are visited before the variable child. `visit` is called
    /// for every terminal node with methods, together with the values captured
    /// by variable segments; returning `true` stops the walk.
    pub(crate) fn walk<'a, 'p, F>(
        &'a self,
        segments: &'p [Cow<'_, str>],
        captures: &mut Captures<'p>,
        visit: &mut F,
    ) -> bool
    where
        F: FnMut(&'a MethodRouter, &Captures<'p>) -> bool,
    {
        let Some((first, rest)) = segments.split_first() else {
            return match &self.methods {
                Some(methods) => visit(methods, captures),
                None => false,
            };
        };
        let first: &'p str = first;

        if let Some(child) = self.find_static_child(first) {
            if child.walk(rest, captures, visit) {
                return true;
            }
        }

        if let Some(child) = &self.param_child {
            captures.push(first);
            if child.walk(rest, captures, visit) {
                return true;
            }
            captures.pop();
        }

        false
    }

    fn find_static_child(&self, segment: &str) -> Option<&Node> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}

/// Splits a request path into non-empty, percent-decoded segments.
///
/// Segments are split before decoding, so `%2F` stays inside its segment.
/// Byte sequences that are not UTF-8 are replaced with U+FFFD.
pub(crate) fn split_path(path: &str) -> SmallVec<[Cow<'_, str>; 8]> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect()
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }
    let bytes = urlencoding::decode_binary(segment.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}
