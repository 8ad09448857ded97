//! Integration tests for Layer 1: Engine
//!
//! Tests for matchers, combinators, memoization, recursive rules, actions,
//! sessions, and PEG notation.

mod combinators;
mod notation;
mod sessions;
