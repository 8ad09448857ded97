//! Cross-layer integration tests for peggy
//!
//! Tests that whole grammars behave correctly from construction through
//! matching, evaluation, and debugging output.

mod config_language;
mod scenarios;
mod tracing;
