//! Integration tests for spans

use peggy_foundation::Span;

#[test]
fn span_measures() {
    let span = Span::new(2, 6);
    assert_eq!(span.len(), 4);
    assert!(!span.is_empty());
    assert!(Span::empty(3).is_empty());
}

#[test]
fn span_join_and_abut() {
    let a = Span::new(0, 3);
    let b = Span::new(3, 5);
    assert!(a.abuts(&b));
    assert!(!b.abuts(&a));
    assert_eq!(a.to(b), Span::new(0, 5));
}

#[test]
fn span_text() {
    let source = "let x = 1;";
    assert_eq!(Span::new(4, 5).text(source), Some("x"));
    assert_eq!(Span::new(8, 20).text(source), None);
}

#[test]
fn span_line_column() {
    let source = "ab\ncd\néf";
    assert_eq!(Span::empty(0).line_column(source), (1, 1));
    assert_eq!(Span::empty(4).line_column(source), (2, 2));
    // 'f' follows a two-byte character.
    assert_eq!(Span::empty(8).line_column(source), (3, 2));
}

#[test]
fn span_from_range() {
    assert_eq!(Span::from(1..4), Span::new(1, 4));
}
