//! A small configuration language built on the engine
//!
//! `key = value` lines with `#` comments; values are integers, strings,
//! booleans, or nested lists. Evaluation produces a map.

use peggy::engine::{actions, choice, seq};
use peggy::foundation::ValueMap;
use peggy::{Matcher, Node, Result, Value};

fn list_values(node: &Node) -> Result<Value> {
    let mut values = Vec::new();
    // Child 2 is the optional item run; an empty list matched the "" branch.
    let items = node
        .child(2)
        .and_then(|optional| optional.child(0))
        .filter(|items| !items.children().is_empty());
    if let Some(items) = items {
        values.push(items.evaluate_child(0)?);
        if let Some(rest) = items.child(1) {
            for step in rest.children() {
                values.push(step.evaluate_child(3)?);
            }
        }
    }
    Ok(Value::from(values))
}

fn build_map(node: &Node) -> Result<Value> {
    let mut map = ValueMap::new();
    for line in node.children() {
        if let Value::Vec(pair) = line.evaluate()? {
            if let (Some(key), Some(value)) = (pair.first(), pair.get(1)) {
                map = map.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(Value::from(map))
}

fn config_grammar() -> Matcher {
    let ws = Matcher::ignore(Matcher::star(choice![" ", "\t"])).with_name("ws");
    let comment = Matcher::ignore(seq![
        "#",
        Matcher::star(seq![Matcher::not("\n"), Matcher::any()])
    ])
    .with_name("comment");
    let eol = seq![&ws, Matcher::optional(&comment), "\n"]
        .with_name("eol")
        .with_action(actions::nil());

    let key = Matcher::regex("[a-z_][a-z0-9_]*").unwrap().with_name("key");
    let integer = Matcher::regex("-?[0-9]+")
        .unwrap()
        .with_name("integer")
        .with_action(actions::int());
    let string = seq![
        Matcher::ignore("\""),
        Matcher::regex(r#"[^"\n]*"#).unwrap(),
        Matcher::ignore("\"")
    ]
    .with_name("string");
    let boolean = choice![
        Matcher::literal("true").with_action(actions::constant(true)),
        Matcher::literal("false").with_action(actions::constant(false))
    ]
    .with_name("boolean")
    .with_action(actions::first());

    let value = Matcher::forward().with_name("value");
    let list = seq![
        "[",
        &ws,
        Matcher::optional(seq![
            &value,
            Matcher::star(seq![&ws, ",", &ws, &value])
        ]),
        &ws,
        "]"
    ]
    .with_name("list")
    .with_action(list_values);
    value
        .define(
            choice![&integer, &string, &boolean, &list]
                .with_name("scalar_or_list")
                .with_action(actions::first()),
        )
        .unwrap();

    let entry = seq![&ws, &key, &ws, "=", &ws, &value, &eol]
        .with_name("entry")
        .with_action(|node: &Node| {
            Ok(Value::from(vec![
                node.evaluate_child(1)?,
                node.evaluate_child(5)?,
            ]))
        });
    let line = choice![&entry, &eol]
        .with_name("line")
        .with_action(actions::first());
    Matcher::star(&line)
        .with_name("file")
        .with_action(build_map)
}

const INPUT: &str = "# settings
name = \"peggy\"
retries = 3   # comment

verbose = true
tags = [1, \"two\", [false], []]
";

fn evaluate(input: &str) -> Option<ValueMap> {
    let node = config_grammar().parse_all(input)?;
    node.evaluate().ok()?.as_map().cloned()
}

#[test]
fn parses_whole_file() {
    assert!(config_grammar().parse_all(INPUT).is_some());
}

#[test]
fn evaluates_to_map() {
    let map = evaluate(INPUT).unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map.get(&Value::from("name")), Some(&Value::from("peggy")));
    assert_eq!(map.get(&Value::from("retries")), Some(&Value::Int(3)));
    assert_eq!(map.get(&Value::from("verbose")), Some(&Value::Bool(true)));
}

#[test]
fn nested_lists() {
    let map = evaluate(INPUT).unwrap();
    let tags = map.get(&Value::from("tags")).unwrap();
    assert_eq!(tags.to_string(), "[1 two [false] []]");
}

#[test]
fn comments_are_not_values() {
    let map = evaluate("a = 1 # x = 2\n").unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.get(&Value::from("x")).is_none());
}

#[test]
fn rejects_malformed_lines() {
    assert!(config_grammar().parse_all("a = \n").is_none());
    assert!(config_grammar().parse_all("a = [1,\n").is_none());
    assert!(config_grammar().parse_all("= 1\n").is_none());
}

#[test]
fn empty_file_is_empty_map() {
    assert_eq!(evaluate("").unwrap().len(), 0);
}

#[test]
fn grammar_is_well_formed() {
    assert!(peggy::engine::analysis::validate(&config_grammar()).is_ok());
}
