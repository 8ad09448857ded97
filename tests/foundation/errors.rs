//! Integration tests for error types
//!
//! Tests error construction, display, and context stacks.

use peggy_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Display
// =============================================================================

#[test]
fn invalid_pattern_display() {
    let err = Error::invalid_pattern("[a-", "unclosed class");
    assert_eq!(err.to_string(), "invalid pattern /[a-/: unclosed class");
}

#[test]
fn invalid_range_display() {
    let err = Error::invalid_range('z', 'a');
    assert_eq!(err.to_string(), "invalid character range [z-a]");
}

#[test]
fn left_recursion_display_joins_path() {
    let err = Error::left_recursion(vec!["expr".into(), "sum".into(), "expr".into()]);
    assert_eq!(err.to_string(), "left recursion: expr -> sum -> expr");
}

#[test]
fn operand_out_of_range_display() {
    let err = Error::operand_out_of_range("Sequence", 3, 2);
    assert_eq!(
        err.to_string(),
        "operand 3 out of range for Sequence (arity 2)"
    );
}

#[test]
fn forward_errors_display() {
    assert_eq!(
        Error::unresolved_forward("rule").to_string(),
        "unresolved forward reference: rule"
    );
    assert_eq!(
        Error::not_forward("Literal").to_string(),
        "Literal is not a forward declaration"
    );
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert!(err.to_string().starts_with("i/o error"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn frames_accumulate_innermost_first() {
    let err = Error::action("bad digit")
        .with_frame("digit @ 3")
        .with_frame("number @ 2");
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["digit @ 3", "number @ 2"]);
}

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_matcher("number")
        .with_position(4)
        .with_frame("expr @ 0");
    assert_eq!(context.to_string(), "in number at 4\n  in expr @ 0\n");
}

#[test]
fn with_context_replaces_context() {
    let err = Error::action("x").with_context(ErrorContext::new().with_position(7));
    assert_eq!(err.context.and_then(|c| c.position), Some(7));
}
