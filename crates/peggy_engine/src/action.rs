//! Semantic action evaluation.
//!
//! Matching and evaluation are separate phases. A result tree is built once
//! and may then be evaluated any number of times, in whole or in part. A
//! node with no action evaluates to its rendered text.
//!
//! The [`actions`] module holds ready-made actions for common shapes.

use peggy_foundation::{Error, Result, Value};

use crate::node::Node;

impl Node {
    /// Computes this node's semantic value.
    ///
    /// Runs the producing matcher's action if one is attached, otherwise
    /// returns the rendered text as [`Value::String`].
    ///
    /// # Errors
    /// Propagates an action's error, adding a `"<name> @ <start>"` frame for
    /// this node.
    pub fn evaluate(&self) -> Result<Value> {
        // The action is cloned out so that it may replace itself while running.
        let Some(action) = self.matcher().action() else {
            return Ok(Value::from(self.rendered()));
        };
        action(self).map_err(|err| err.with_frame(format!("{} @ {}", self.name(), self.start())))
    }

    /// Evaluates every child in order.
    ///
    /// # Errors
    /// Returns the first child error.
    pub fn evaluate_children(&self) -> Result<Vec<Value>> {
        self.children().iter().map(Node::evaluate).collect()
    }

    /// Evaluates child `index`.
    ///
    /// # Errors
    /// Returns an action error if the child does not exist, or the child's
    /// own error.
    pub fn evaluate_child(&self, index: usize) -> Result<Value> {
        self.child(index)
            .ok_or_else(|| {
                Error::action(format!(
                    "{} has no child {index} ({} children)",
                    self.name(),
                    self.children().len()
                ))
            })?
            .evaluate()
    }
}

/// Stock actions.
pub mod actions {
    use super::{Error, Node, Result, Value};

    /// Evaluates to nil.
    pub fn nil() -> impl Fn(&Node) -> Result<Value> {
        |_| Ok(Value::Nil)
    }

    /// Evaluates to the first child's value, or the rendered text of a leaf.
    ///
    /// Suits Choice and Forward wrappers that should pass their winner on.
    pub fn first() -> impl Fn(&Node) -> Result<Value> {
        |node| match node.child(0) {
            Some(child) => child.evaluate(),
            None => Ok(Value::from(node.rendered())),
        }
    }

    /// Evaluates to a vector of the children's values.
    pub fn collect() -> impl Fn(&Node) -> Result<Value> {
        |node| Ok(Value::from(node.evaluate_children()?))
    }

    /// Evaluates to the children's values with nils dropped.
    pub fn compact() -> impl Fn(&Node) -> Result<Value> {
        |node| {
            let mut values = node.evaluate_children()?;
            values.retain(|value| !value.is_nil());
            Ok(Value::from(values))
        }
    }

    /// Parses the rendered text as an integer.
    pub fn int() -> impl Fn(&Node) -> Result<Value> {
        |node| {
            let text = node.rendered();
            text.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|err| Error::action(format!("not an integer: {text:?}: {err}")))
        }
    }

    /// Parses the rendered text as a float.
    pub fn float() -> impl Fn(&Node) -> Result<Value> {
        |node| {
            let text = node.rendered();
            text.trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|err| Error::action(format!("not a number: {text:?}: {err}")))
        }
    }

    /// Evaluates to a fixed value.
    pub fn constant(value: impl Into<Value>) -> impl Fn(&Node) -> Result<Value> {
        let value = value.into();
        move |_| Ok(value.clone())
    }
}
