use funcon::ast::ParseTree;
use funcon::lexer::Token;
use funcon::parser::{ParseError, ParseState, parse_term};

fn parse(input: &str) -> Result<ParseTree, ParseError> {
    let tokens = Token::lex(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    parse_term(&mut state)
}

fn parse_ok(input: &str) -> ParseTree {
    match parse(input) {
        Ok(tree) => tree,
        Err(err) => panic!("parsing failed: {err}"),
    }
}

#[test]
fn parse_bare_name() {
    let tree = parse_ok("given");
    assert!(matches!(tree, ParseTree::Name(n) if n.value == "given"));
}

#[test]
fn parse_call_with_arguments() {
    let tree = parse_ok("integer-add(1, 2, 3)");
    let ParseTree::Call(call) = tree else {
        panic!("expected call");
    };
    assert_eq!(call.name.value, "integer-add");
    assert_eq!(call.args.len(), 3);
    assert!(matches!(&call.args[0], ParseTree::Integer(i) if i.value == "1"));
}

#[test]
fn parse_empty_call() {
    let tree = parse_ok("yield()");
    assert!(matches!(tree, ParseTree::Call(c) if c.args.is_empty()));
}

#[test]
fn parse_nested_calls() {
    let tree = parse_ok("give(3, integer-add(given, 4))");
    let ParseTree::Call(call) = tree else {
        panic!("expected call");
    };
    assert!(matches!(&call.args[1], ParseTree::Call(inner) if inner.args.len() == 2));
}

#[test]
fn parse_empty_sequence() {
    let tree = parse_ok("()");
    assert!(matches!(tree, ParseTree::Sequence(g) if g.items.is_empty()));
}

#[test]
fn parse_list() {
    let tree = parse_ok("[1, 'a', \"b\"]");
    let ParseTree::List(group) = tree else {
        panic!("expected list");
    };
    assert_eq!(group.items.len(), 3);
    assert!(matches!(group.items[1], ParseTree::Char(_)));
    assert!(matches!(group.items[2], ParseTree::String(_)));
}

#[test]
fn parse_set_and_map() {
    assert!(matches!(parse_ok("{1, 2}"), ParseTree::Set(g) if g.items.len() == 2));
    assert!(matches!(parse_ok("{ }"), ParseTree::Set(g) if g.items.is_empty()));

    let tree = parse_ok("{1 |-> \"a\", 2 |-> (3, 4)}");
    let ParseTree::Map(map) = tree else {
        panic!("expected map");
    };
    assert_eq!(map.entries.len(), 2);
    assert!(matches!(&map.entries[1].1, ParseTree::Sequence(g) if g.items.len() == 2));
}

#[test]
fn parse_mixed_braces_fails() {
    assert!(parse("{1 |-> 2, 3}").is_err());
}

#[test]
fn parse_type_operators() {
    let tree = parse_ok("integers | booleans & ~atoms");
    let ParseTree::Union(union) = tree else {
        panic!("expected union");
    };
    assert_eq!(union.items.len(), 2);
    let ParseTree::Intersection(both) = &union.items[1] else {
        panic!("expected intersection");
    };
    assert!(matches!(&both.items[1], ParseTree::Complement(inner, _)
        if matches!(inner.as_ref(), ParseTree::Name(n) if n.value == "atoms")));
}

#[test]
fn parse_rejects_trailing_input() {
    let err = parse("1 2").unwrap_err();
    assert!(err.to_string().contains("integer '2'"));
}

#[test]
fn parse_reports_furthest_error() {
    let err = parse("integer-add(1, 2").unwrap_err();
    assert!(err.expected.iter().any(|e| e == "')'"));
}
