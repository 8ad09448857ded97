//! Result-tree rendering.
//!
//! Prints one node per line, children indented under their parent:
//!
//! ```text
//! item 0..3 "42"
//!   ~Ignore 0..1 ""
//!     Literal 0..1 " "
//!   number 1..3 "42"
//! ```
//!
//! Ignored nodes are marked with `~`; their subtrees are still shown.

use std::fmt::Write;

use peggy_engine::Node;

/// Options for [`render_with`].
#[derive(Clone, Debug)]
pub struct TreeOptions {
    /// Deepest level to print; deeper subtrees are summarized. `None` prints
    /// everything.
    pub max_depth: Option<usize>,
    /// Whether to descend into ignored subtrees.
    pub expand_ignored: bool,
    /// Longest rendered text shown per line before truncating.
    pub max_text: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            expand_ignored: true,
            max_text: 40,
        }
    }
}

impl TreeOptions {
    /// Builder method to limit depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder method to collapse ignored subtrees.
    #[must_use]
    pub fn collapse_ignored(mut self) -> Self {
        self.expand_ignored = false;
        self
    }
}

/// Renders `node` and its descendants with default options.
#[must_use]
pub fn render(node: &Node) -> String {
    render_with(node, &TreeOptions::default())
}

/// Renders `node` and its descendants.
#[must_use]
pub fn render_with(node: &Node, options: &TreeOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0, options);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize, options: &TreeOptions) {
    let marker = if node.is_ignored() { "~" } else { "" };
    let text = truncate(&node.rendered(), options.max_text);
    let _ = writeln!(
        out,
        "{}{marker}{} {}..{} {text:?}",
        "  ".repeat(depth),
        node.name(),
        node.start(),
        node.end(),
    );

    if node.children().is_empty() || (node.is_ignored() && !options.expand_ignored) {
        return;
    }
    if options.max_depth.is_some_and(|max| depth >= max) {
        let _ = writeln!(
            out,
            "{}... {} children",
            "  ".repeat(depth + 1),
            node.children().len()
        );
        return;
    }
    for child in node.children() {
        write_node(out, child, depth + 1, options);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max).collect();
    short.push_str("...");
    short
}
