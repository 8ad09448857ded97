//! Debugging a grammar end to end: trace, profile, and tree output

use peggy::debug::{HumanFormatter, JsonFormatter, MatchProfile, TraceFormatter, tree};
use peggy::engine::{TraceEvent, TracerConfig};
use peggy::{Matcher, Session, SessionConfig};

fn assignment() -> Matcher {
    let ws = Matcher::ignore(Matcher::star(" ")).with_name("ws");
    let name = Matcher::regex("[a-z]+").unwrap().with_name("name");
    let number = Matcher::regex("[0-9]+").unwrap().with_name("number");
    Matcher::sequence([&name, &ws, &Matcher::literal("="), &ws, &number]).with_name("assignment")
}

#[test]
fn trace_balances_attempts_and_outcomes() {
    let grammar = assignment();
    let mut session = Session::with_config("x = 1", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let stats = session.tracer().stats();
    let count = |kind: &str| stats.event_counts.get(kind).copied().unwrap_or(0);
    assert_eq!(count("attempt"), count("matched") + count("no-match"));
    assert_eq!(session.tracer().depth(), 0);

    let last = session.tracer().buffer().last().unwrap();
    assert!(matches!(
        &last.event,
        TraceEvent::Matched { name, len: 5, .. } if name == "assignment"
    ));
}

#[test]
fn human_trace_is_indented_by_nesting() {
    let grammar = assignment();
    let mut session = Session::with_config("x = 1", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let records: Vec<_> = session.tracer().buffer().iter().collect();
    let output = HumanFormatter::new().format_many(&records);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.first(), Some(&"? assignment @0"));
    assert_eq!(lines.get(1), Some(&"  ? name @0"));
    assert_eq!(lines.last(), Some(&"+ assignment @0 [5]"));
}

#[test]
fn json_trace_has_one_object_per_record() {
    let grammar = assignment();
    let mut session = Session::with_config("x = 1", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let records: Vec<_> = session.tracer().buffer().iter().collect();
    let output = JsonFormatter::new().format_many(&records);
    assert!(output.starts_with('['));
    assert!(output.ends_with(']'));
    assert_eq!(output.matches("\"id\":").count(), records.len());
}

#[test]
fn filtered_trace_keeps_only_selected_events() {
    let grammar = assignment();
    let tracer = TracerConfig::new()
        .enabled()
        .filter_events(vec!["no-match".to_string()]);
    let config = SessionConfig::default().with_tracer(tracer);
    let mut session = Session::with_config("x = y", config);
    assert!(grammar.match_here(&mut session).is_none());

    let buffer = session.tracer().buffer();
    assert!(!buffer.is_empty());
    assert!(buffer.iter().all(|r| r.event_type() == "no-match"));
    assert_eq!(buffer.by_event_type("no-match").len(), buffer.len());
}

#[test]
fn profile_of_backtracking_grammar() {
    let word = Matcher::regex("[a-z]+").unwrap().with_name("word");
    let grammar = Matcher::choice([
        Matcher::sequence([word.clone(), Matcher::literal("()")]).with_name("call"),
        Matcher::sequence([word.clone(), Matcher::literal("[]")]).with_name("index"),
        word.clone(),
    ]);
    let mut session = Session::with_config("name", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let profile = MatchProfile::from_tracer(session.tracer());
    let entry = profile.get("word").unwrap();
    assert_eq!(entry.attempts, 1);
    assert_eq!(entry.memo_hits, 2);
    assert_eq!(profile.get("call").unwrap().failures, 1);
    assert_eq!(profile.get("index").unwrap().failures, 1);
}

#[test]
fn tree_shows_ignored_whitespace() {
    let node = assignment().parse("x = 1").unwrap();
    let output = tree::render(&node);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines[0], "assignment 0..5 \"x=1\"");
    assert_eq!(lines[1], "  name 0..1 \"x\"");
    assert_eq!(lines[2], "  ~ws 1..2 \"\"");
}
