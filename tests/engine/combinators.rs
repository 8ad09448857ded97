//! Integration tests for terminal matchers and combinators

use peggy_engine::{Matcher, Session};

fn digit() -> Matcher {
    Matcher::range('0', '9').unwrap()
}

// =============================================================================
// Terminals
// =============================================================================

#[test]
fn literal_matches_exact_prefix() {
    let m = Matcher::literal("let");
    let mut session = Session::new("a let");
    assert!(m.match_at(&mut session, 0).is_none());
    let node = m.match_at(&mut session, 2).unwrap();
    assert_eq!(node.len(), 3);
    assert_eq!(node.start(), 2);
    assert!(m.match_at(&mut session, 3).is_none());
}

#[test]
fn literal_fails_on_short_input() {
    assert!(Matcher::literal("abc").parse("ab").is_none());
}

#[test]
fn range_consumes_character_width() {
    let greek = Matcher::range('α', 'ω').unwrap();
    let node = greek.parse("β!").unwrap();
    assert_eq!(node.len(), 'β'.len_utf8());
    assert_eq!(node.rendered(), "β");
    assert!(greek.parse("b").is_none());
}

#[test]
fn range_rejects_reversed_bounds() {
    assert!(Matcher::range('z', 'a').is_err());
}

#[test]
fn any_fails_only_at_end() {
    let any = Matcher::any();
    let mut session = Session::new("xy");
    assert!(any.match_at(&mut session, 1).is_some());
    assert!(any.match_at(&mut session, 2).is_none());
}

#[test]
fn regex_is_anchored_at_position() {
    let number = Matcher::regex(r"[0-9]+(\.[0-9]+)?").unwrap();
    let mut session = Session::new("x 3.14 y");
    assert!(number.match_at(&mut session, 0).is_none());
    assert_eq!(number.match_at(&mut session, 2).unwrap().rendered(), "3.14");
}

#[test]
fn invalid_regex_fails_at_construction() {
    assert!(Matcher::regex("(unclosed").is_err());
}

// =============================================================================
// Sequence and Choice
// =============================================================================

#[test]
fn sequence_is_all_or_nothing() {
    let m = Matcher::sequence(["a", "b"]);
    assert!(m.parse("ac").is_none());
    let node = m.parse("ab").unwrap();
    assert_eq!(node.children().len(), 2);
}

#[test]
fn sequence_positions_follow_consumed_length() {
    let m = Matcher::sequence([Matcher::star("a"), Matcher::literal("b")]);
    let node = m.parse("aaab").unwrap();
    assert_eq!(node.child(1).unwrap().start(), 3);
    assert_eq!(node.len(), 4);
}

#[test]
fn choice_commits_to_first_success() {
    let a = Matcher::literal("a");
    let ab = Matcher::literal("ab");
    let m = Matcher::choice([&a, &ab]);
    let node = m.parse("ab").unwrap();
    assert_eq!(node.len(), 1);
    assert_eq!(node.child(0).unwrap().matcher(), &a);
}

#[test]
fn choice_falls_through_to_later_alternatives() {
    let m = Matcher::choice(["x", "y", "z"]);
    assert_eq!(m.parse("z").unwrap().rendered(), "z");
    assert!(m.parse("w").is_none());
}

// =============================================================================
// Repetition
// =============================================================================

#[test]
fn star_always_succeeds() {
    let m = Matcher::star(digit());
    assert!(m.parse("").unwrap().is_empty());
    assert!(m.parse("x").unwrap().is_empty());
    assert_eq!(m.parse("123x").unwrap().children().len(), 3);
}

#[test]
fn star_stops_on_zero_length_repetition() {
    let m = Matcher::star(Matcher::optional("a"));
    let node = m.parse("aab").unwrap();
    assert_eq!(node.len(), 2);
    assert_eq!(node.children().len(), 2);
}

#[test]
fn plus_requires_one() {
    let m = Matcher::plus(digit());
    assert!(m.parse("x").is_none());
    assert_eq!(m.parse("7").unwrap().len(), 1);
}

#[test]
fn optional_always_succeeds() {
    let m = Matcher::optional("-");
    assert_eq!(m.parse("-1").unwrap().len(), 1);
    assert!(m.parse("1").unwrap().is_empty());
}

// =============================================================================
// Lookahead and Ignore
// =============================================================================

#[test]
fn lookahead_never_consumes() {
    let and = Matcher::and("abc");
    let node = and.parse("abcd").unwrap();
    assert!(node.is_empty());
    assert!(node.children().is_empty());
    assert!(and.parse("abd").is_none());

    let not = Matcher::not("abc");
    assert!(not.parse("abd").unwrap().is_empty());
    assert!(not.parse("abc").is_none());
}

#[test]
fn keyword_boundary_with_not() {
    let word_char = Matcher::range('a', 'z').unwrap();
    let keyword = Matcher::sequence([Matcher::literal("if"), Matcher::not(&word_char)]);
    assert!(keyword.parse("if x").is_some());
    assert!(keyword.parse("iffy").is_none());
}

#[test]
fn ignore_keeps_length_but_hides_text() {
    let spaces = Matcher::ignore(Matcher::star(" "));
    let m = Matcher::sequence([spaces, Matcher::literal("x")]);
    let node = m.parse("   x").unwrap();
    assert_eq!(node.len(), 4);
    assert_eq!(node.rendered(), "x");
    assert_eq!(node.child(1).unwrap().start(), 3);
    assert!(node.child(0).unwrap().is_ignored());
}

#[test]
fn ignore_propagates_failure() {
    assert!(Matcher::ignore("#").parse("x").is_none());
}

#[test]
fn ignored_nodes_nest() {
    let comment = Matcher::ignore(Matcher::sequence([
        Matcher::literal("#"),
        Matcher::star(Matcher::sequence([Matcher::not("\n"), Matcher::any()])),
    ]));
    let line = Matcher::sequence([Matcher::literal("a"), comment, Matcher::literal("\n")]);
    let node = line.parse("a# note\n").unwrap();
    assert_eq!(node.len(), 8);
    assert_eq!(node.rendered(), "a\n");
}
