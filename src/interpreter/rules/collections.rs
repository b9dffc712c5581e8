//! Sequences, tuples, lists, vectors and named datatype values.

use crate::catalog::Op;
use crate::error::Stuck;
use crate::term::{LIST, Sequence, TUPLE, Term, VECTOR};

use super::{arg, integer, no_rule, sequence, stuck};

pub(super) fn apply(op: Op, args: &[Term]) -> Result<Term, Stuck> {
    match op {
        Op::Length => Ok(Term::Int(sequence(op, args, 0)?.len() as i64)),
        Op::Index => {
            let position = integer(op, arg(op, args, 0)?)?;
            let items = sequence(op, args, 1)?;
            // 1-based; anything outside the sequence has no value
            Ok(match usize::try_from(position) {
                Ok(position) if position >= 1 => items.get(position - 1),
                _ => Term::empty(),
            })
        }
        Op::Reverse => Ok(Term::Spread(sequence(op, args, 0)?.reversed())),
        Op::Tuple => Ok(Term::datatype(TUPLE, sequence(op, args, 0)?.clone())),
        Op::List => Ok(Term::datatype(LIST, sequence(op, args, 0)?.clone())),
        Op::Vector => Ok(Term::datatype(VECTOR, sequence(op, args, 0)?.clone())),
        Op::TupleElements => elements(op, args, TUPLE),
        Op::ListElements => elements(op, args, LIST),
        Op::VectorElements => elements(op, args, VECTOR),
        Op::ListAppend => {
            let mut appended = Sequence::empty();
            for list in sequence(op, args, 0)? {
                appended = appended.append(expect(op, list, LIST)?);
            }
            Ok(Term::datatype(LIST, appended))
        }
        Op::ListHead => Ok(expect(op, arg(op, args, 0)?, LIST)?.head()),
        Op::ListTail => {
            let items = expect(op, arg(op, args, 0)?, LIST)?;
            if items.is_empty() {
                return Ok(Term::empty());
            }
            Ok(Term::datatype(LIST, items.tail()))
        }
        Op::DatatypeValue => {
            let id = arg(op, args, 0)?;
            let name = id
                .as_string()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| stuck(op, format!("expected a constructor name, found {id}")))?;
            Ok(Term::datatype(&name, sequence(op, args, 1)?.clone()))
        }
        _ => Err(no_rule(op)),
    }
}

fn expect<'a>(op: Op, term: &'a Term, constructor: &str) -> Result<&'a Sequence, Stuck> {
    term.datatype_args(constructor)
        .ok_or_else(|| stuck(op, format!("expected a {constructor}, found {term}")))
}

/// The components of a datatype value, spread into the enclosing term.
fn elements(op: Op, args: &[Term], constructor: &str) -> Result<Term, Stuck> {
    let items = expect(op, arg(op, args, 0)?, constructor)?;
    Ok(Term::Spread(items.clone()))
}
