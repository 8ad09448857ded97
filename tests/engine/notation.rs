//! Integration tests for operator sugar, macros, names, and PEG notation

use peggy_engine::{Matcher, Variant, choice, seq};

fn digit() -> Matcher {
    Matcher::range('0', '9').unwrap().with_name("digit")
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn operators_build_expected_variants() {
    let a = Matcher::literal("a");
    assert_eq!((&a | "b").variant(), Variant::Choice);
    assert_eq!((!&a).variant(), Variant::Not);
    assert_eq!((&a * "b").variant(), Variant::Sequence);
    assert_eq!((&a + "b").variant(), Variant::Sequence);
}

#[test]
fn operators_compose_into_grammar() {
    // one or more digits, then ';'
    let statement = digit() + ";";
    assert!(statement.parse_all("123;").is_some());
    assert!(statement.parse_all(";").is_none());

    // any number of '-', then digits
    let negated = "-" * Matcher::plus(digit());
    assert!(negated.parse_all("--7").is_some());
    assert!(negated.parse_all("7").is_some());
    assert!(negated.parse_all("-").is_none());

    let keyword = seq!["if", !Matcher::range('a', 'z').unwrap()];
    assert!(keyword.parse("if(").is_some());
    assert!(keyword.parse("iffy").is_none());
}

#[test]
fn literal_on_the_left() {
    let m = "x" | digit();
    assert!(m.parse("x").is_some());
    assert!(m.parse("5").is_some());
    let padded = " " * digit();
    assert_eq!(padded.parse("   4").unwrap().len(), 4);
    let dashes = "-" + digit();
    assert!(dashes.parse("4").is_none());
}

#[test]
fn char_and_string_convert_to_literals() {
    let m = digit() | 'x';
    assert!(m.parse("x").is_some());
    let m = digit() | String::from("yz");
    assert_eq!(m.parse("yz").unwrap().len(), 2);
}

#[test]
fn macros_accept_mixed_operands() {
    let d = digit();
    let pair = seq!["(", &d, ",", d.clone(), ")"];
    assert!(pair.parse_all("(1,2)").is_some());
    let either = choice![&pair, "nil"];
    assert!(either.parse_all("nil").is_some());
    assert!(choice![].parse("x").is_none());
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn default_names_are_variant_names() {
    assert_eq!(Matcher::literal("a").name(), "Literal");
    assert_eq!(Matcher::any().name(), "Any");
    assert_eq!(Matcher::optional("a").name(), "Optional");
    assert_eq!(Matcher::forward().name(), "Forward");
    assert!(!Matcher::any().has_name());
}

#[test]
fn custom_names_flow_to_nodes() {
    let m = Matcher::literal("a");
    m.set_name("letter");
    assert!(m.has_name());
    assert_eq!(m.parse("a").unwrap().name(), "letter");
}

#[test]
fn identity_is_per_construction() {
    let a = Matcher::literal("a");
    let b = Matcher::literal("a");
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert!(a.ptr_eq(&a.clone()));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_renders_peg_notation() {
    let d = Matcher::range('0', '9').unwrap();
    let number = seq![Matcher::optional("-"), Matcher::plus(&d)];
    assert_eq!(number.to_string(), "('-'? [0-9]+)");
    let word = Matcher::ignore(Matcher::star(" ")) * Matcher::regex("[a-z]+").unwrap();
    assert_eq!(word.to_string(), "(~' '** /[a-z]+/)");
    assert_eq!(Matcher::and(Matcher::any()).to_string(), "&.");
}

#[test]
fn display_of_recursive_grammar_is_finite() {
    let list = Matcher::forward().with_name("list");
    list.define(choice![seq!["i", ",", &list], "i"]).unwrap();
    assert_eq!(list.to_string(), "(('i' ',' list)|'i')");
}

#[test]
fn display_of_undefined_forward() {
    let rule = Matcher::forward().with_name("rule");
    assert_eq!(seq!["a", &rule].to_string(), "('a' <rule>)");
}
