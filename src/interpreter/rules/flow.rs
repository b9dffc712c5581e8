use tracing::trace;

use crate::catalog::Op;
use crate::error::{Result, Stuck};
use crate::term::Term;

use super::super::Interpreter;
use super::{arg, boolean, no_rule, sequence, stuck};

pub(super) fn apply(interpreter: &mut Interpreter, op: Op, args: &[Term]) -> Result<Term> {
    match op {
        Op::LeftToRight => in_order(interpreter, op, args, false),
        Op::RightToLeft => in_order(interpreter, op, args, true),
        Op::Sequential => sequential(interpreter, op, args),
        Op::Effect => {
            sequence(op, args, 0)?;
            Ok(Term::Null)
        }
        Op::Choice => {
            let options = sequence(op, args, 0)?;
            let chosen = options
                .random(&mut interpreter.rng)
                .cloned()
                .ok_or_else(|| stuck(op, "nothing to choose from"))?;
            trace!(options = options.len(), "choice made");
            Ok(chosen)
        }
        Op::IfTrueElse => {
            let branch = if boolean(op, arg(op, args, 0)?)? { 1 } else { 2 };
            Ok(arg(op, args, branch)?.clone())
        }
        Op::Stuck => Err(Stuck::new(op.name()).into()),
        Op::Fail => Err(stuck(op, "failed").into()),
        _ => Err(no_rule(op).into()),
    }
}

/// Step the leftmost (or rightmost) unevaluated element; once all are
/// values the operator gives them back.
fn in_order(interpreter: &mut Interpreter, op: Op, args: &[Term], reverse: bool) -> Result<Term> {
    let items = sequence(op, args, 0)?;
    let pending = if reverse {
        items.iter().rposition(Term::is_reducible)
    } else {
        items.iter().position(Term::is_reducible)
    };

    match pending {
        None => Ok(Term::from_sequence(items.clone())),
        Some(index) => {
            let next = interpreter.step(&items.as_slice()[index])?;
            Ok(Term::node(op, vec![Term::Seq(items.replace(index, next))]))
        }
    }
}

/// `sequential(S*, Y)`: run each statement to `null-value`, then become `Y`.
fn sequential(interpreter: &mut Interpreter, op: Op, args: &[Term]) -> Result<Term> {
    let statements = sequence(op, args, 0)?;
    let last = arg(op, args, 1)?;

    let Some(first) = statements.as_slice().first() else {
        return Ok(last.clone());
    };

    if first.is_reducible() {
        let next = interpreter.step(first)?;
        return Ok(Term::node(
            op,
            vec![Term::Seq(statements.replace(0, next)), last.clone()],
        ));
    }

    match first {
        Term::Null if statements.len() == 1 => Ok(last.clone()),
        Term::Null => Ok(Term::node(
            op,
            vec![Term::Seq(statements.tail()), last.clone()],
        )),
        other => Err(stuck(op, format!("statement computed {other} instead of null-value")).into()),
    }
}
