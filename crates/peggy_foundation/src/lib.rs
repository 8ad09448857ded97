//! Core types for the peggy PEG engine.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Value`] - Semantic values produced by matcher actions
//! - Persistent collections ([`PVec`], [`PMap`])
//! - [`Span`] - Byte ranges of matched input
//! - [`Source`] - Random-access input adapters ([`PagedSource`] for files)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod paged;
pub mod source;
pub mod span;
pub mod value;

pub use collections::{PMap, PVec};
pub use error::{Error, ErrorContext, ErrorKind};
pub use paged::PagedSource;
pub use source::Source;
pub use span::Span;
pub use value::{Value, ValueMap, ValueVec};

/// Result type used throughout peggy.
pub type Result<T> = std::result::Result<T, Error>;
