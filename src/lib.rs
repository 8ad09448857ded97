//! Peggy - Packrat PEG matcher combinators
//!
//! This crate re-exports all layers of the peggy system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: peggy_debug      - Trace formatting, tree rendering, profiles
//! Layer 1: peggy_engine     - Matchers, combinators, memo table, actions
//! Layer 0: peggy_foundation - Core types (Value, Error, Span, Source)
//! ```

pub use peggy_debug as debug;
pub use peggy_engine as engine;
pub use peggy_foundation as foundation;

pub use peggy_engine::{Matcher, Node, Session, SessionConfig, actions};
pub use peggy_foundation::{Error, ErrorKind, Result, Value};
