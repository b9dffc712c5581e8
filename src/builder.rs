//! Resolves parse trees into initial terms.
//!
//! Every name goes through [`factory::construct`], so `{1|->"a"}` becomes
//! `map(tuple(1,"a"))` and `integers | booleans` becomes
//! `union-type(integers,booleans)`. The only name the catalog does not know
//! is `atom`, which takes a string and builds the atom directly.

use thiserror::Error;
use tracing::debug;

use crate::ast::{Group, Literal, ParseTree};
use crate::error::ConstructionError;
use crate::factory;
use crate::lexer::Token;
use crate::parser::{ParseError, ParseState, parse_term};
use crate::term::{Sequence, Term};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("lexing failed: {0}")]
    Lex(String),
    #[error("parsing failed: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Lex, parse and build one term.
pub fn read_term(source: &str) -> Result<Term, ReadError> {
    let tokens = Token::lex(source).map_err(|err| ReadError::Lex(err.to_string()))?;
    debug!(tokens = tokens.len(), "lexed term");

    let mut state = ParseState::new(tokens);
    let tree = parse_term(&mut state)?;
    Ok(build_initial_term(&tree)?)
}

pub fn build_initial_term(tree: &ParseTree) -> Result<Term, ConstructionError> {
    match tree {
        ParseTree::Integer(lit) => factory::integer(&lit.value),
        ParseTree::String(lit) => Ok(factory::string(unquote(lit))),
        ParseTree::Char(lit) => factory::character(unquote(lit)),
        ParseTree::Name(name) => factory::construct(&name.value, vec![]),
        ParseTree::Call(call) if call.name.value == "atom" => atom(&call.args),
        ParseTree::Call(call) => factory::construct(&call.name.value, build_all(&call.args)?),
        ParseTree::Sequence(group) => Ok(Term::from_sequence(Sequence::new(build_all(
            &group.items,
        )?))),
        ParseTree::List(group) => named("list", group),
        ParseTree::Set(group) => named("set", group),
        ParseTree::Map(map) => {
            let tuples = map
                .entries
                .iter()
                .map(|(key, value)| {
                    let parts = vec![build_initial_term(key)?, build_initial_term(value)?];
                    factory::construct("tuple", parts)
                })
                .collect::<Result<Vec<_>, _>>()?;
            factory::construct("map", tuples)
        }
        ParseTree::Union(group) => named("union-type", group),
        ParseTree::Intersection(group) => named("intersection-type", group),
        ParseTree::Complement(inner, _) => {
            factory::construct("complement-type", vec![build_initial_term(inner)?])
        }
    }
}

fn build_all(trees: &[ParseTree]) -> Result<Vec<Term>, ConstructionError> {
    trees.iter().map(build_initial_term).collect()
}

fn named(name: &str, group: &Group) -> Result<Term, ConstructionError> {
    factory::construct(name, build_all(&group.items)?)
}

fn atom(args: &[ParseTree]) -> Result<Term, ConstructionError> {
    match args {
        [ParseTree::String(lit)] => Ok(Term::atom(unquote(lit))),
        _ => Err(ConstructionError::InvalidLiteral(
            "atom expects a single string".to_string(),
        )),
    }
}

/// The text between the delimiting quotes of a string or character token.
fn unquote(lit: &Literal) -> &str {
    let value = lit.value.as_str();
    value
        .get(1..value.len().saturating_sub(1))
        .unwrap_or_default()
}
