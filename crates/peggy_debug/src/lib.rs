//! Debugging aids for peggy grammars.
//!
//! This crate provides:
//! - [`format`] - Human-readable and JSON formatting of trace records
//! - [`tree`] - Indented rendering of result trees
//! - [`profile`] - Per-matcher attempt, success, and memo-hit counts
//!
//! # Example
//!
//! ```text
//! let mut session = Session::with_config(input, SessionConfig::traced());
//! let node = grammar.match_here(&mut session);
//! println!("{}", HumanFormatter::new().format_many(&session.tracer().buffer().recent(20)));
//! println!("{}", MatchProfile::from_tracer(session.tracer()));
//! if let Some(node) = node {
//!     println!("{}", tree::render(&node));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod format;
pub mod profile;
pub mod tree;

pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use profile::{MatchProfile, ProfileEntry};
pub use tree::{TreeOptions, render, render_with};
