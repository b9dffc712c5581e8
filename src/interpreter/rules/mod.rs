//! Rewrite rules of the catalog operators.
//!
//! By the time a rule runs every eager parameter already holds a value;
//! lazy parameters are untouched. A rule either produces the successor
//! term or reports [`Stuck`].

mod booleans;
mod collections;
mod control;
mod flow;
mod integers;
mod maps;
mod sets;

use crate::catalog::Op;
use crate::error::{Result, Stuck};
use crate::term::{Node, Sequence, Term};

use super::Interpreter;

pub(super) fn apply(interpreter: &mut Interpreter, node: &Node) -> Result<Term> {
    let op = node.op;
    let args = node.params.as_slice();

    match op {
        Op::LeftToRight
        | Op::RightToLeft
        | Op::Sequential
        | Op::Effect
        | Op::Choice
        | Op::IfTrueElse
        | Op::Stuck
        | Op::Fail => flow::apply(interpreter, op, args),

        Op::Atomic
        | Op::Yield
        | Op::YieldOnValue
        | Op::Give
        | Op::Given
        | Op::Print
        | Op::Read
        | Op::UseAtomNotIn
        | Op::AllocateVariable
        | Op::Assign
        | Op::Assigned => control::apply(interpreter, op, args),

        Op::Not
        | Op::And
        | Op::Or
        | Op::Implies
        | Op::ExclusiveOr
        | Op::IsEqual
        | Op::IsInType => Ok(booleans::apply(op, args)?),

        Op::IntegerAdd
        | Op::IntegerMultiply
        | Op::IntegerSubtract
        | Op::IntegerDivide
        | Op::IntegerModulo
        | Op::IntegerPower
        | Op::IntegerAbsoluteValue
        | Op::IntegerNegate
        | Op::IntegerIsLess
        | Op::IntegerIsGreater
        | Op::IntegerIsLessOrEqual
        | Op::IntegerIsGreaterOrEqual
        | Op::NaturalSuccessor
        | Op::NaturalPredecessor => Ok(integers::apply(op, args)?),

        Op::Length
        | Op::Index
        | Op::Reverse
        | Op::Tuple
        | Op::TupleElements
        | Op::List
        | Op::ListElements
        | Op::ListAppend
        | Op::ListHead
        | Op::ListTail
        | Op::Vector
        | Op::VectorElements
        | Op::DatatypeValue => Ok(collections::apply(op, args)?),

        Op::Map
        | Op::MapEmpty
        | Op::MapLookup
        | Op::MapOverride
        | Op::MapUnite
        | Op::MapDomain
        | Op::MapElements
        | Op::MapDelete => Ok(maps::apply(op, args)?),

        Op::Set
        | Op::SetEmpty
        | Op::IsInSet
        | Op::SetElements
        | Op::SetUnite
        | Op::SetDifference
        | Op::SetSize
        | Op::SetInsert
        | Op::SomeElement
        | Op::ElementNotIn => Ok(sets::apply(op, args, &mut interpreter.rng)?),
    }
}

fn stuck(op: Op, reason: impl Into<String>) -> Stuck {
    Stuck::new(op.name()).because(reason)
}

fn no_rule(op: Op) -> Stuck {
    stuck(op, "no rule applies")
}

fn arg(op: Op, args: &[Term], index: usize) -> Result<&Term, Stuck> {
    args.get(index)
        .ok_or_else(|| stuck(op, format!("missing parameter {index}")))
}

/// The sequence bound to a sequence parameter.
fn sequence(op: Op, args: &[Term], index: usize) -> Result<&Sequence, Stuck> {
    match arg(op, args, index)? {
        Term::Seq(items) => Ok(items),
        other => Err(stuck(op, format!("expected a sequence, found {other}"))),
    }
}

fn integer(op: Op, term: &Term) -> Result<i64, Stuck> {
    term.as_int()
        .ok_or_else(|| stuck(op, format!("expected an integer, found {term}")))
}

fn boolean(op: Op, term: &Term) -> Result<bool, Stuck> {
    term.as_bool()
        .ok_or_else(|| stuck(op, format!("expected a boolean, found {term}")))
}
