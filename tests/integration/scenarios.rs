//! End-to-end matching scenarios over digits and operators

use peggy::{Matcher, Session};

fn digit() -> Matcher {
    Matcher::range('0', '9').unwrap()
}

#[test]
fn digits_before_letters() {
    let node = Matcher::plus(digit()).parse("123abc").unwrap();
    assert_eq!(node.len(), 3);
    assert_eq!(node.rendered(), "123");
}

#[test]
fn parenthesized_number() {
    let m = Matcher::sequence([
        Matcher::literal("("),
        Matcher::plus(digit()),
        Matcher::literal(")"),
    ]);
    assert_eq!(m.parse("(42)").unwrap().len(), 4);
}

#[test]
fn choice_takes_first_not_longest() {
    let m = Matcher::choice(["foo", "foobar"]);
    let node = m.parse("foobar").unwrap();
    assert_eq!(node.len(), 3);
    assert_eq!(node.rendered(), "foo");
}

#[test]
fn star_does_not_give_back() {
    let m = Matcher::sequence([
        Matcher::star(Matcher::range('a', 'z').unwrap()),
        Matcher::literal("a"),
    ]);
    assert!(m.parse("aaa").is_none());
}

#[test]
fn negative_lookahead_consumes_nothing() {
    let node = Matcher::not("b").parse("a").unwrap();
    assert_eq!(node.len(), 0);
}

#[test]
fn ignored_spaces_position_the_next_match() {
    let m = Matcher::sequence([Matcher::ignore(Matcher::star(" ")), Matcher::literal("x")]);
    let mut session = Session::new("   x");
    let node = m.match_here(&mut session).unwrap();
    assert_eq!(node.len(), 4);
    assert_eq!(node.rendered(), "x");
    assert_eq!(node.child(1).unwrap().start(), 3);
}
