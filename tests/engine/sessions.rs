//! Integration tests for sessions over in-memory and paged input

use std::io::Cursor;

use peggy_engine::{Matcher, Session, SessionConfig, choice};
use peggy_foundation::{PagedSource, Source};

fn paged(text: &str, page_size: usize) -> PagedSource<Cursor<Vec<u8>>> {
    PagedSource::new(Cursor::new(text.as_bytes().to_vec()))
        .unwrap()
        .with_page_size(page_size)
}

fn token() -> Matcher {
    let word = Matcher::regex("[a-z]+").unwrap().with_name("word");
    let number = Matcher::regex("[0-9]+").unwrap().with_name("number");
    let space = Matcher::ignore(Matcher::plus(" ")).with_name("space");
    choice![&word, &number, &space, Matcher::any().with_name("symbol")]
}

fn tokenize<S: Source>(session: &mut Session<S>) -> Vec<(String, String)> {
    let token = token();
    let mut tokens = Vec::new();
    while !session.is_at_end() {
        let Some(node) = session.consume(&token) else {
            break;
        };
        let winner = node.child(0).unwrap();
        if !winner.is_ignored() {
            tokens.push((winner.name(), node.rendered()));
        }
    }
    tokens
}

#[test]
fn consume_walks_the_input() {
    let mut session = Session::new("let x = 42;");
    let tokens = tokenize(&mut session);
    let names: Vec<_> = tokens.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["word", "word", "symbol", "number", "symbol"]);
    assert_eq!(tokens[3].1, "42");
    assert_eq!(session.remaining(), 0);
}

#[test]
fn paged_input_matches_like_a_string() {
    let text = "alpha 12 beta 345 gamma;";
    let mut from_str = Session::new(text);
    let mut from_pages = Session::new(paged(text, 8));
    assert_eq!(tokenize(&mut from_pages), tokenize(&mut from_str));
}

#[test]
fn paged_literal_spans_pages() {
    let source = paged("0123456789abcdef", 4);
    let mut session = Session::new(source);
    let m = Matcher::literal("3456789abc");
    assert_eq!(m.match_at(&mut session, 3).unwrap().len(), 10);
}

#[test]
fn paged_regex_sees_one_page() {
    let word = Matcher::regex("[a-z]+").unwrap();
    let mut session = Session::new(paged("abcdefghijkl", 8));
    assert_eq!(word.match_at(&mut session, 0).unwrap().len(), 8);
}

#[test]
fn seek_then_match_here() {
    let m = Matcher::literal("b");
    let mut session = Session::new("ab");
    assert!(m.match_here(&mut session).is_none());
    session.seek(1);
    assert_eq!(m.match_here(&mut session).unwrap().start(), 1);
    // match_here leaves the cursor alone.
    assert_eq!(session.position(), 1);
}

#[test]
fn configured_memo_capacity() {
    let config = SessionConfig::default().with_memo_capacity(1024);
    let mut session = Session::with_config("aaa", config);
    assert!(Matcher::plus("a").match_here(&mut session).is_some());
    assert!(!session.memo().is_empty());
    assert!(!session.tracer().is_enabled());
}
