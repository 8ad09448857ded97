//! Integration tests for match profiles

use peggy_debug::MatchProfile;
use peggy_engine::{Matcher, Session, SessionConfig, TracerConfig};

fn digits() -> Matcher {
    Matcher::plus(Matcher::range('0', '9').unwrap().with_name("digit")).with_name("digits")
}

#[test]
fn profile_counts_repetition() {
    let grammar = digits();
    let mut session = Session::with_config("123", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let profile = MatchProfile::from_tracer(session.tracer());
    let digit = profile.get("digit").unwrap();
    // One attempt per digit, plus the failed attempt at the end.
    assert_eq!(digit.attempts, 4);
    assert_eq!(digit.matches, 3);
    assert_eq!(digit.failures, 1);
    assert_eq!(profile.get("digits").unwrap().matches, 1);
}

#[test]
fn profile_from_filtered_records() {
    let grammar = digits();
    let mut session = Session::with_config("12", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let failures = session.tracer().buffer().by_event_type("no-match");
    let profile = MatchProfile::from_records(failures);
    assert_eq!(profile.len(), 1);
    assert_eq!(profile.total().failures, 1);
}

#[test]
fn profile_survives_ring_buffer_eviction() {
    let grammar = digits();
    let config = SessionConfig::default()
        .with_tracer(TracerConfig::new().enabled().with_buffer_size(4));
    let mut session = Session::with_config("123456789", config);
    grammar.match_here(&mut session).unwrap();

    assert_eq!(session.tracer().buffer().len(), 4);
    let profile = MatchProfile::from_tracer(session.tracer());
    assert!(profile.total().calls() + profile.total().matches + profile.total().failures <= 4);
}

#[test]
fn profile_table_lists_busiest_first() {
    let grammar = digits();
    let mut session = Session::with_config("42", SessionConfig::traced());
    grammar.match_here(&mut session).unwrap();

    let table = MatchProfile::from_tracer(session.tracer()).to_string();
    let rows: Vec<_> = table.lines().skip(1).collect();
    assert!(rows[0].starts_with("digit "));
}
