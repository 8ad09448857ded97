//! Matchers, combinators, memo tables, and result trees for peggy.
//!
//! This crate provides:
//! - [`Matcher`] - Terminal matchers and combinators, with names, actions,
//!   and patchable operand slots for recursive rules
//! - [`Session`] - Input, cursor, memo table, and tracer for one parse
//! - [`MemoTable`] - Write-once packrat cache keyed by (matcher, position)
//! - [`Node`] - Result trees with exact consumed length and rendered text
//! - [`actions`] - Ready-made semantic actions
//! - [`analysis`] - Nullability and left-recursion checks
//! - [`Tracer`] - Zero-overhead-when-off trace of memoized dispatch
//!
//! # Example
//!
//! ```text
//! let digit = Matcher::range('0', '9')?;
//! let number = Matcher::plus(&digit).with_action(actions::int());
//! let node = number.parse("123abc").unwrap();
//! assert_eq!(node.len(), 3);
//! assert_eq!(node.evaluate()?, Value::Int(123));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod analysis;
pub mod config;
mod display;
pub mod matcher;
pub mod memo;
pub mod node;
mod ops;
mod recognize;
pub mod session;
pub mod trace;

pub use action::actions;
pub use config::SessionConfig;
pub use matcher::{Action, Matcher, MatcherId, Variant};
pub use memo::{MemoStats, MemoTable, Memoized};
pub use node::Node;
pub use session::Session;
pub use trace::{TraceBuffer, TraceEvent, TraceOutput, TraceRecord, Tracer, TracerConfig};
