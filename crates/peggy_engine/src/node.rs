//! Result trees.
//!
//! A [`Node`] records one successful match: the matcher that produced it,
//! where it started, the literal text it recognized itself, and the nodes of
//! its sub-matches in match order.
//!
//! Two measures of a node are kept apart:
//!
//! - consumed length: its own text plus every child's consumed length. This
//!   is how far the cursor moves and is always exact.
//! - rendered text: its own text followed by every child's rendered text,
//!   except that an ignored node renders as nothing.
//!
//! Whitespace and comments wrapped in [`Matcher::ignore`] therefore keep the
//! positions of later matches correct while staying out of the text that
//! actions see.
//!
//! Nodes are immutable and cheap to clone. The memo table hands out the same
//! node to every caller that asks for a cached result.

use std::fmt;
use std::rc::Rc;

use peggy_foundation::Span;

use crate::matcher::Matcher;

struct NodeData {
    matcher: Matcher,
    start: usize,
    len: usize,
    text: String,
    children: Vec<Node>,
    ignored: bool,
}

/// One successful match.
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

impl Node {
    fn from_data(data: NodeData) -> Self {
        Self(Rc::new(data))
    }

    /// A node with literal text and no children.
    pub(crate) fn leaf(matcher: &Matcher, start: usize, text: String) -> Self {
        Self::from_data(NodeData {
            matcher: matcher.clone(),
            start,
            len: text.len(),
            text,
            children: Vec::new(),
            ignored: false,
        })
    }

    /// A zero-length node with no text and no children.
    pub(crate) fn zero_width(matcher: &Matcher, start: usize) -> Self {
        Self::leaf(matcher, start, String::new())
    }

    /// An ignored node wrapping `inner`.
    pub(crate) fn ignored(matcher: &Matcher, inner: Node) -> Self {
        Self::from_data(NodeData {
            matcher: matcher.clone(),
            start: inner.start(),
            len: inner.len(),
            text: String::new(),
            children: vec![inner],
            ignored: true,
        })
    }

    /// The same match, attributed to another matcher.
    ///
    /// Plus and Optional recognize through an internal expansion; the result
    /// is re-owned so that actions and names follow the matcher the grammar
    /// author wrote.
    pub(crate) fn reowned(&self, matcher: &Matcher) -> Self {
        Self::from_data(NodeData {
            matcher: matcher.clone(),
            start: self.0.start,
            len: self.0.len,
            text: self.0.text.clone(),
            children: self.0.children.clone(),
            ignored: self.0.ignored,
        })
    }

    /// Returns the matcher that produced this node.
    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.0.matcher
    }

    /// Returns the producing matcher's name.
    #[must_use]
    pub fn name(&self) -> String {
        self.0.matcher.name()
    }

    /// Returns the byte offset where the match starts.
    #[must_use]
    pub fn start(&self) -> usize {
        self.0.start
    }

    /// Returns the byte offset just past the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.0.start + self.0.len
    }

    /// Returns the consumed length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len
    }

    /// Returns true for a zero-length match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.len == 0
    }

    /// Returns the consumed range.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start(), self.end())
    }

    /// Returns the text this node recognized itself, excluding children.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Returns the child nodes in match order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.0.children
    }

    /// Returns child `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.0.children.get(index)
    }

    /// Returns true if this node renders as empty text.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.0.ignored
    }

    /// Returns the rendered text: own text plus children's rendered text,
    /// with ignored subtrees left out.
    #[must_use]
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        if self.0.ignored {
            return;
        }
        out.push_str(&self.0.text);
        for child in &self.0.children {
            child.render_into(out);
        }
    }

    /// Returns a childless copy whose own text is this node's rendered text.
    ///
    /// The consumed range is unchanged, so a flattened node that hid ignored
    /// input is longer than its text.
    #[must_use]
    pub fn flatten(&self) -> Node {
        Self::from_data(NodeData {
            matcher: self.0.matcher.clone(),
            start: self.0.start,
            len: self.0.len,
            text: self.rendered(),
            children: Vec::new(),
            ignored: self.0.ignored,
        })
    }

    /// Returns a new node with `other` appended as the last child.
    ///
    /// Returns `None` unless `other` starts exactly where this node ends.
    #[must_use]
    pub fn append(&self, other: &Node) -> Option<Node> {
        if other.start() != self.end() {
            return None;
        }
        let mut children = self.0.children.clone();
        children.push(other.clone());
        Some(Self::from_data(NodeData {
            matcher: self.0.matcher.clone(),
            start: self.0.start,
            len: self.0.len + other.len(),
            text: self.0.text.clone(),
            children,
            ignored: self.0.ignored,
        }))
    }

    /// Returns true if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Structural equality: same matcher, position, text, flags and children.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.0.matcher == other.0.matcher
                && self.0.start == other.0.start
                && self.0.len == other.0.len
                && self.0.ignored == other.0.ignored
                && self.0.text == other.0.text
                && self.0.children == other.0.children)
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("name", &self.name())
            .field("span", &(self.start()..self.end()));
        if !self.0.text.is_empty() {
            s.field("text", &self.0.text);
        }
        if self.0.ignored {
            s.field("ignored", &true);
        }
        if !self.0.children.is_empty() {
            s.field("children", &self.0.children);
        }
        s.finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates contiguous children for Sequence and Star.
pub(crate) struct NodeBuilder {
    matcher: Matcher,
    start: usize,
    end: usize,
    children: Vec<Node>,
}

impl NodeBuilder {
    pub(crate) fn new(matcher: &Matcher, start: usize) -> Self {
        Self {
            matcher: matcher.clone(),
            start,
            end: start,
            children: Vec::new(),
        }
    }

    /// Position where the next child must start.
    pub(crate) fn end(&self) -> usize {
        self.end
    }

    /// Appends `child`, or returns `None` if it does not start at [`Self::end`].
    pub(crate) fn push(&mut self, child: Node) -> Option<()> {
        if child.start() != self.end {
            return None;
        }
        self.end = child.end();
        self.children.push(child);
        Some(())
    }

    pub(crate) fn finish(self) -> Node {
        Node::from_data(NodeData {
            matcher: self.matcher,
            start: self.start,
            len: self.end - self.start,
            text: String::new(),
            children: self.children,
            ignored: false,
        })
    }
}
