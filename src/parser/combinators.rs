use std::ops::{Add, BitOr, Mul, Shr};
use std::rc::Rc;

use crate::lexer::Token;

use super::state::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators ===

impl<T: 'static> BoxedParser<T> {
    /// Choice: try self, if fails try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    // Error is already recorded in state by the parser
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }

    /// Add a label to this parser for better error messages
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| match self.parse(state) {
            Ok(v) => Ok(v),
            Err(mut err) => {
                // Replace expected with our label
                err.expected = vec![name.to_string()];
                state.record_error(err.clone());
                Err(err)
            }
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let b = rhs.parse(state)?;
            Ok((a, b))
        })
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        BoxedParser::new(move |state: &mut ParseState| {
            self.parse(state)?;
            rhs.parse(state)
        })
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }
}

// === Primitive Parsers ===

/// Low-level token parser with custom error - for internal use
fn token_with_error<F: Fn(&Token) -> bool + 'static>(
    predicate: F,
    expected: &'static str,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| {
        let err = match state.peek() {
            Some(tok) if predicate(tok) => {
                return state
                    .advance()
                    .ok_or_else(|| ParseError::new("unexpected end of input"));
            }
            Some(tok) => ParseError::new("unexpected token")
                .expected(expected)
                .found(tok.describe())
                .at(tok.pos()),
            None => ParseError::new("unexpected end of input").expected(expected),
        };
        state.record_error(err.clone());
        Err(err)
    })
}

pub fn expect_comma() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Comma(_)), "','")
}

pub fn expect_lparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LParen(_)), "'('")
}

pub fn expect_rparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RParen(_)), "')'")
}

pub fn expect_lbracket() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LBracket(_)), "'['")
}

pub fn expect_rbracket() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RBracket(_)), "']'")
}

pub fn expect_lbrace() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LBrace(_)), "'{'")
}

pub fn expect_rbrace() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RBrace(_)), "'}'")
}

pub fn expect_maps_to() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::MapsTo(_)), "'|->'")
}

pub fn expect_bar() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Bar(_)), "'|'")
}

pub fn expect_ampersand() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Ampersand(_)), "'&'")
}

pub fn expect_tilde() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Tilde(_)), "'~'")
}

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Optional: parse zero or one
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}

/// Parse `item ("," item)*`, or nothing at all.
pub fn comma_separated<T: 'static>(item: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let Some(first) = optional(item.clone()).parse(state)? else {
            return Ok(vec![]);
        };
        let rest = many(expect_comma() * item.clone()).parse(state)?;
        Ok(std::iter::once(first).chain(rest).collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(input: &str) -> ParseState {
        ParseState::new(Token::lex(input).expect("lexing failed"))
    }

    #[test]
    fn test_operators_compose() {
        let pair = expect_lparen() + expect_comma() * expect_rparen()
            >> |(open, close)| {
                matches!(open, Token::LParen(_)) && matches!(close, Token::RParen(_))
            };

        let mut input = state("(,)");
        assert!(matches!(pair.parse(&mut input), Ok(true)));
        assert!(!input.has_next());
    }

    #[test]
    fn test_choice_restores_and_merges_expectations() {
        let either = expect_bar() | expect_tilde();

        let mut input = state("~");
        assert!(matches!(either.parse(&mut input), Ok(Token::Tilde(_))));

        let mut input = state("&");
        assert!(either.parse(&mut input).is_err());
        assert_eq!(input.position(), 0);
        let expected = &input.furthest_error().expect("error recorded").expected;
        assert!(expected.contains(&"'|'".to_string()));
        assert!(expected.contains(&"'~'".to_string()));
    }

    #[test]
    fn test_comma_separated_allows_empty() {
        let items = comma_separated(expect_tilde());
        let count = |input: &str| items.parse(&mut state(input)).map(|found| found.len()).ok();
        assert_eq!(count("~, ~, ~"), Some(3));
        assert_eq!(count(")"), Some(0));
    }
}
