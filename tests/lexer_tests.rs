use funcon::lexer::Token;

#[test]
fn lex_hyphenated_identifiers() {
    let tokens = Token::lex("integer-add is-in-set").unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Ident(i) if i.value == "integer-add"));
    assert!(matches!(&tokens[1], Token::Ident(i) if i.value == "is-in-set"));
}

#[test]
fn lex_integers() {
    let tokens = Token::lex("42 -7 0").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], Token::Integer(i) if i.value == "42"));
    assert!(matches!(&tokens[1], Token::Integer(i) if i.value == "-7"));
    assert!(matches!(&tokens[2], Token::Integer(i) if i.value == "0"));
}

#[test]
fn lex_string_and_char_literals() {
    let tokens = Token::lex(r#""hi\"there" 'x'"#).unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::StringLiteral(s) if s.value == r#""hi\"there""#));
    assert!(matches!(&tokens[1], Token::CharLiteral(c) if c.value == "'x'"));
}

#[test]
fn lex_delimiters() {
    let tokens = Token::lex("( ) [ ] { } ,").unwrap();
    assert_eq!(tokens.len(), 7);
    assert!(matches!(tokens[0], Token::LParen(_)));
    assert!(matches!(tokens[1], Token::RParen(_)));
    assert!(matches!(tokens[2], Token::LBracket(_)));
    assert!(matches!(tokens[3], Token::RBracket(_)));
    assert!(matches!(tokens[4], Token::LBrace(_)));
    assert!(matches!(tokens[5], Token::RBrace(_)));
    assert!(matches!(tokens[6], Token::Comma(_)));
}

#[test]
fn lex_type_operators() {
    let tokens = Token::lex("| & ~ |->").unwrap();
    assert_eq!(tokens.len(), 4);
    assert!(matches!(tokens[0], Token::Bar(_)));
    assert!(matches!(tokens[1], Token::Ampersand(_)));
    assert!(matches!(tokens[2], Token::Tilde(_)));
    assert!(matches!(tokens[3], Token::MapsTo(_)));
}

#[test]
fn lex_call_without_spaces() {
    let tokens = Token::lex("give(3,given)").unwrap();
    assert_eq!(tokens.len(), 6);
    assert!(matches!(&tokens[0], Token::Ident(i) if i.value == "give"));
    assert!(matches!(tokens[1], Token::LParen(_)));
    assert!(matches!(&tokens[2], Token::Integer(i) if i.value == "3"));
    assert!(matches!(tokens[3], Token::Comma(_)));
    assert!(matches!(&tokens[4], Token::Ident(i) if i.value == "given"));
    assert!(matches!(tokens[5], Token::RParen(_)));
}

#[test]
fn describe_tokens() {
    let tokens = Token::lex("map-lookup |->").unwrap();
    assert_eq!(tokens[0].describe(), "identifier 'map-lookup'");
    assert_eq!(tokens[1].describe(), "'|->'");
}
