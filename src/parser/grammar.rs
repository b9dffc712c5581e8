//! Grammar for initial terms
//!
//! ```text
//! term         := intersection ("|" intersection)*
//! intersection := unary ("&" unary)*
//! unary        := "~" unary | primary
//! primary      := integer | string | char | call | group | list | braces
//! call         := ident ["(" args ")"]
//! group        := "(" args ")"
//! list         := "[" args "]"
//! braces       := "{" [entry ("," entry)*] "}"
//! entry        := term ["|->" term]
//! args         := [term ("," term)*]
//! ```

use lachs::Span;

use crate::ast::{Call, Group, Literal, MapLiteral, ParseTree};
use crate::lexer::Token;

use super::combinators::{
    BoxedParser, comma_separated, expect_ampersand, expect_bar, expect_lbrace, expect_lbracket,
    expect_lparen, expect_maps_to, expect_rbrace, expect_rbracket, expect_rparen, expect_tilde,
    many, optional,
};
use super::state::{ParseError, ParseState, Parser};

/// term := intersection ("|" intersection)*
pub fn term() -> BoxedParser<ParseTree> {
    BoxedParser::new(|state: &mut ParseState| {
        let first = intersection().parse(state)?;
        let rest = many(expect_bar() * intersection()).parse(state)?;
        Ok(combine(first, rest, ParseTree::Union))
    })
}

/// intersection := unary ("&" unary)*
fn intersection() -> BoxedParser<ParseTree> {
    BoxedParser::new(|state: &mut ParseState| {
        let first = unary().parse(state)?;
        let rest = many(expect_ampersand() * unary()).parse(state)?;
        Ok(combine(first, rest, ParseTree::Intersection))
    })
}

fn combine(
    first: ParseTree,
    rest: Vec<ParseTree>,
    wrap: fn(Group) -> ParseTree,
) -> ParseTree {
    let Some(last) = rest.last() else {
        return first;
    };
    let position = first.position().merge(&last.position());
    let mut items = vec![first];
    items.extend(rest);
    wrap(Group { items, position })
}

/// unary := "~" unary | primary
fn unary() -> BoxedParser<ParseTree> {
    BoxedParser::new(|state: &mut ParseState| {
        match optional(expect_tilde()).parse(state)? {
            Some(tilde) => {
                let inner = unary().parse(state)?;
                let position = tilde.pos().merge(&inner.position());
                Ok(ParseTree::Complement(Box::new(inner), position))
            }
            None => primary().parse(state),
        }
    })
}

fn primary() -> BoxedParser<ParseTree> {
    (literal() | call() | group() | list() | braces()).label("term")
}

/// integer | string | char
fn literal() -> BoxedParser<ParseTree> {
    BoxedParser::new(|state: &mut ParseState| {
        let tree = match state.peek() {
            Some(Token::Integer(int)) => ParseTree::Integer(Literal {
                value: int.value.clone(),
                position: int.position.clone(),
            }),
            Some(Token::StringLiteral(string)) => ParseTree::String(Literal {
                value: string.value.clone(),
                position: string.position.clone(),
            }),
            Some(Token::CharLiteral(ch)) => ParseTree::Char(Literal {
                value: ch.value.clone(),
                position: ch.position.clone(),
            }),
            other => {
                let mut err = ParseError::new("unexpected token").expected("literal");
                if let Some(tok) = other {
                    err = err.found(tok.describe()).at(tok.pos());
                }
                state.record_error(err.clone());
                return Err(err);
            }
        };
        state.advance();
        Ok(tree)
    })
}

fn ident() -> BoxedParser<Literal> {
    BoxedParser::new(|state: &mut ParseState| {
        let literal = match state.peek() {
            Some(Token::Ident(id)) => Literal {
                value: id.value.clone(),
                position: id.position.clone(),
            },
            Some(tok) => {
                let err = ParseError::new("unexpected token")
                    .expected("identifier")
                    .found(tok.describe())
                    .at(tok.pos());
                state.record_error(err.clone());
                return Err(err);
            }
            None => {
                let err = ParseError::new("unexpected end of input").expected("identifier");
                state.record_error(err.clone());
                return Err(err);
            }
        };
        state.advance();
        Ok(literal)
    })
}

/// "(" args ")", returning the items and the span of both delimiters
fn delimited(
    open: BoxedParser<Token>,
    close: BoxedParser<Token>,
) -> BoxedParser<(Vec<ParseTree>, Span)> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = open.parse(state)?;
        let items = comma_separated(term()).parse(state)?;
        let end = close.parse(state)?;
        Ok((items, start.pos().merge(&end.pos())))
    })
}

/// call := ident ["(" args ")"]
fn call() -> BoxedParser<ParseTree> {
    BoxedParser::new(|state: &mut ParseState| {
        let name = ident().parse(state)?;
        match optional(delimited(expect_lparen(), expect_rparen())).parse(state)? {
            Some((args, span)) => {
                let position = name.position.merge(&span);
                Ok(ParseTree::Call(Call {
                    name,
                    args,
                    position,
                }))
            }
            None => Ok(ParseTree::Name(name)),
        }
    })
}

fn group() -> BoxedParser<ParseTree> {
    delimited(expect_lparen(), expect_rparen())
        >> |(items, position)| ParseTree::Sequence(Group { items, position })
}

fn list() -> BoxedParser<ParseTree> {
    delimited(expect_lbracket(), expect_rbracket())
        >> |(items, position)| ParseTree::List(Group { items, position })
}

/// entry := term ["|->" term]
fn entry() -> BoxedParser<(ParseTree, Option<ParseTree>)> {
    term() + optional(expect_maps_to() * term())
}

/// braces := "{" [entry ("," entry)*] "}"
///
/// All entries are maplets, making a map, or none are, making a set.
fn braces() -> BoxedParser<ParseTree> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = expect_lbrace().parse(state)?;
        let entries = comma_separated(entry()).parse(state)?;
        let end = expect_rbrace().parse(state)?;
        let position = start.pos().merge(&end.pos());

        let maplets = entries.iter().filter(|(_, value)| value.is_some()).count();
        if maplets == 0 {
            let items = entries.into_iter().map(|(key, _)| key).collect();
            return Ok(ParseTree::Set(Group { items, position }));
        }
        if maplets < entries.len() {
            let err = ParseError::new("set elements mixed with map entries").at(position);
            state.record_error(err.clone());
            return Err(err);
        }

        let entries = entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect();
        Ok(ParseTree::Map(MapLiteral { entries, position }))
    })
}
