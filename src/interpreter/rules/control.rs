//! Operators that read or write entities.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{GIVEN_VALUE, Op, STANDARD_IN, STANDARD_OUT, STORE, USED_ATOM_SET, YIELDED};
use crate::error::{Result, Stuck};
use crate::term::{Sequence, Term, VARIABLE};
use crate::types::{Type, belongs_to};

use super::super::Interpreter;
use super::sets::fresh_atom;
use super::{arg, no_rule, sequence, stuck};

pub(super) fn apply(interpreter: &mut Interpreter, op: Op, args: &[Term]) -> Result<Term> {
    match op {
        Op::Atomic => atomic(interpreter, op, args),
        Op::Yield => {
            interpreter.entities.signal(YIELDED, Term::signal());
            Ok(Term::Null)
        }
        Op::YieldOnValue => {
            let value = arg(op, args, 0)?.clone();
            interpreter.entities.signal(YIELDED, Term::signal());
            Ok(value)
        }
        Op::Give => give(interpreter, op, args),
        Op::Given => interpreter
            .entities
            .contextual(GIVEN_VALUE)
            .cloned()
            .ok_or_else(|| stuck(op, "no given value").into()),
        Op::Print => {
            let values = sequence(op, args, 0)?.clone();
            interpreter
                .entities
                .append_mutable(STANDARD_OUT, Term::Seq(values));
            Ok(Term::Null)
        }
        Op::Read => interpreter
            .entities
            .pop_input(STANDARD_IN)
            .ok_or_else(|| stuck(op, "standard-in is exhausted").into()),
        Op::UseAtomNotIn => {
            let excluded = match arg(op, args, 0)? {
                Term::Set(set) => set.clone(),
                other => return Err(stuck(op, format!("expected a set, found {other}")).into()),
            };
            Ok(use_atom(interpreter, |atom| excluded.contains(atom)))
        }
        Op::AllocateVariable => {
            let ty = match arg(op, args, 0)? {
                Term::Type(ty) => ty.clone(),
                other => return Err(stuck(op, format!("expected a type, found {other}")).into()),
            };
            let location = use_atom(interpreter, |_| false);
            let mut store = store(interpreter);
            store.insert(location.clone(), Sequence::empty());
            interpreter
                .entities
                .set_mutable(STORE, Term::map(store));
            Ok(Term::datatype(
                VARIABLE,
                Sequence::new([location, Term::Type(ty)]),
            ))
        }
        Op::Assign => {
            let (location, ty) = variable(op, arg(op, args, 0)?)?;
            let value = arg(op, args, 1)?;
            if !belongs_to(value, &ty) {
                return Err(stuck(op, format!("{value} is not of type {ty}")).into());
            }
            let mut store = store(interpreter);
            let Some(slot) = store.get_mut(&location) else {
                return Err(stuck(op, format!("{location} is not allocated")).into());
            };
            *slot = Sequence::new([value.clone()]);
            interpreter
                .entities
                .set_mutable(STORE, Term::map(store));
            Ok(Term::Null)
        }
        Op::Assigned => {
            let (location, _) = variable(op, arg(op, args, 0)?)?;
            match store(interpreter).get(&location) {
                Some(value) if !value.is_empty() => Ok(Term::from_sequence(value.clone())),
                Some(_) => Err(stuck(op, format!("{location} is uninitialised")).into()),
                None => Err(stuck(op, format!("{location} is not allocated")).into()),
            }
        }
        _ => Err(no_rule(op).into()),
    }
}

/// `atomic(X)`: keep stepping `X` within one step until it is a value.
///
/// A yield signalled by `X` is consumed here and ends the step with
/// `atomic(X')`, so the signal never escapes.
fn atomic(interpreter: &mut Interpreter, op: Op, args: &[Term]) -> Result<Term> {
    let mut body = arg(op, args, 0)?.clone();
    loop {
        if body.is_value() {
            return Ok(body);
        }
        let next = interpreter.advance(&body)?;
        if interpreter.entities.take_signal(YIELDED).is_some() {
            debug!("atomic consumed a yield");
            if next.is_value() {
                return Ok(next);
            }
            return Ok(Term::node(op, vec![next]));
        }
        body = next;
    }
}

/// `give(V, Y)`: step `Y` with `given-value` bound to `V`.
fn give(interpreter: &mut Interpreter, op: Op, args: &[Term]) -> Result<Term> {
    let value = arg(op, args, 0)?.clone();
    let body = arg(op, args, 1)?;
    if body.is_value() {
        return Ok(body.clone());
    }

    let shadowed = interpreter
        .entities
        .bind_contextual(GIVEN_VALUE, value.clone());
    let stepped = interpreter.step(body);
    interpreter
        .entities
        .unbind_contextual(GIVEN_VALUE, shadowed);

    Ok(Term::node(op, vec![value, stepped?]))
}

/// A fresh atom, recorded in `used-atom-set`.
fn use_atom(interpreter: &mut Interpreter, excluded: impl Fn(&Term) -> bool) -> Term {
    let mut used = match interpreter.entities.mutable(USED_ATOM_SET) {
        Term::Set(set) => (*set).clone(),
        _ => Default::default(),
    };
    let atom = fresh_atom(|atom| excluded(atom) || used.contains(atom));
    used.insert(atom.clone());
    interpreter
        .entities
        .set_mutable(USED_ATOM_SET, Term::set(used));
    atom
}

fn store(interpreter: &Interpreter) -> BTreeMap<Term, Sequence> {
    match interpreter.entities.mutable(STORE) {
        Term::Map(map) => (*map).clone(),
        _ => BTreeMap::new(),
    }
}

fn variable(op: Op, term: &Term) -> Result<(Term, Type), Stuck> {
    let parts = term
        .datatype_args(VARIABLE)
        .ok_or_else(|| stuck(op, format!("expected a variable, found {term}")))?;
    match parts.as_slice() {
        [location, Term::Type(ty)] => Ok((location.clone(), Type::clone(ty))),
        _ => Err(stuck(op, format!("malformed variable {term}"))),
    }
}
