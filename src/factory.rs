//! # Node Factory
//!
//! Builds terms from an operator name and already-built arguments.
//!
//! ```text
//! construct("integer-add", [1, 2, 3])
//!     → alias resolution      ("int-add" → "integer-add")
//!     → catalog lookup        (Op::IntegerAdd, params [EagerSeq])
//!     → parameter binding     ([ (1,2,3) ])
//!     → Term::Node
//! ```
//!
//! A sequence parameter absorbs every argument not claimed by the fixed
//! parameters before and after it. Value and type constructors build their
//! value immediately.

use tracing::trace;

use crate::catalog::{self, Entry, Op};
use crate::error::{Arity, ConstructionError};
use crate::term::{Sequence, Term};
use crate::types::Type;

/// Build the term named `name` applied to `args`.
pub fn construct(name: &str, args: Vec<Term>) -> Result<Term, ConstructionError> {
    let entry =
        catalog::lookup(name).ok_or_else(|| ConstructionError::UnknownOperator(name.to_string()))?;
    trace!(name, arguments = args.len(), "constructing term");

    match entry {
        Entry::Funcon(op) => Ok(Term::node(op, bind(op, args)?)),
        Entry::Value(ctor) => {
            if !args.is_empty() {
                return Err(ConstructionError::Arity {
                    operator: ctor.name().to_string(),
                    expected: Arity::Exactly(0),
                    found: args.len(),
                });
            }
            Ok(ctor.build())
        }
        Entry::Type(ctor) => {
            let types = args
                .into_iter()
                .map(|arg| match arg {
                    Term::Type(ty) => Ok(Type::clone(&ty)),
                    other => Err(ConstructionError::InvalidTypeArgument {
                        operator: ctor.name().to_string(),
                        found: other.to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Term::ty(ctor.build(types)?))
        }
    }
}

/// Bind a flat argument list to the declared parameters of `op`.
///
/// Fixed parameters take one argument each. The sequence parameter, if
/// any, takes the run of arguments between the fixed ones as one
/// [`Term::Seq`].
pub fn bind(op: Op, mut args: Vec<Term>) -> Result<Vec<Term>, ConstructionError> {
    let params = op.params();
    let found = args.len();

    let Some(at) = params.iter().position(|p| p.is_sequence()) else {
        if found != params.len() {
            return Err(ConstructionError::Arity {
                operator: op.name().to_string(),
                expected: Arity::Exactly(params.len()),
                found,
            });
        }
        return Ok(args);
    };

    let fixed = params.len() - 1;
    if found < fixed {
        return Err(ConstructionError::Arity {
            operator: op.name().to_string(),
            expected: Arity::AtLeast(fixed),
            found,
        });
    }

    let after = params.len() - at - 1;
    let trailing = args.split_off(found - after);
    let absorbed = args.split_off(at);
    args.push(Term::Seq(Sequence::new(absorbed)));
    args.extend(trailing);
    Ok(args)
}

/// Undo [`bind`]: the parameters of a node as one flat argument list,
/// with `replacement` spliced in at `index`.
pub fn flatten_params(op: Op, params: &[Term], index: usize, replacement: Sequence) -> Vec<Term> {
    let shape = op.params();
    let mut flat = Vec::with_capacity(params.len() + replacement.len());
    for (position, param) in params.iter().enumerate() {
        if position == index {
            flat.extend(replacement.iter().cloned());
        } else if shape.get(position).is_some_and(|p| p.is_sequence()) {
            flat.extend(param.clone().into_sequence().iter().cloned());
        } else {
            flat.push(param.clone());
        }
    }
    flat
}

/// An integer literal from its source text.
pub fn integer(text: &str) -> Result<Term, ConstructionError> {
    text.parse::<i64>()
        .map(Term::Int)
        .map_err(|_| ConstructionError::InvalidLiteral(text.to_string()))
}

/// A character literal from its text between the quotes.
pub fn character(text: &str) -> Result<Term, ConstructionError> {
    let unescaped = unescape(text);
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Term::Char(c)),
        _ => Err(ConstructionError::InvalidLiteral(format!("'{text}'"))),
    }
}

/// A string literal from its text between the quotes.
pub fn string(text: &str) -> Term {
    Term::string(&unescape(text))
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
