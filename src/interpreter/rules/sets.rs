use std::collections::BTreeSet;

use crate::catalog::Op;
use crate::error::Stuck;
use crate::rng::ChoiceRng;
use crate::term::{Sequence, Term};
use crate::types::Type;

use super::{arg, no_rule, sequence, stuck};

type Elements = BTreeSet<Term>;

pub(super) fn apply(op: Op, args: &[Term], rng: &mut ChoiceRng) -> Result<Term, Stuck> {
    match op {
        Op::Set => Ok(Term::set(sequence(op, args, 0)?.iter().cloned().collect())),
        Op::SetEmpty => Ok(Term::set(Elements::new())),
        Op::IsInSet => {
            let element = arg(op, args, 0)?;
            let set = expect_set(op, arg(op, args, 1)?)?;
            Ok(Term::Bool(set.contains(element)))
        }
        Op::SetElements => {
            let set = expect_set(op, arg(op, args, 0)?)?;
            Ok(Term::Spread(set.iter().cloned().collect()))
        }
        Op::SetUnite => {
            let mut united = Elements::new();
            for set in sequence(op, args, 0)? {
                united.extend(expect_set(op, set)?.iter().cloned());
            }
            Ok(Term::set(united))
        }
        Op::SetDifference => {
            let left = expect_set(op, arg(op, args, 0)?)?;
            let right = expect_set(op, arg(op, args, 1)?)?;
            Ok(Term::set(left.difference(right).cloned().collect()))
        }
        Op::SetSize => {
            let set = expect_set(op, arg(op, args, 0)?)?;
            Ok(Term::Int(set.len() as i64))
        }
        Op::SetInsert => {
            let element = arg(op, args, 0)?;
            let mut set = expect_set(op, arg(op, args, 1)?)?.clone();
            set.insert(element.clone());
            Ok(Term::set(set))
        }
        Op::SomeElement => {
            let set = expect_set(op, arg(op, args, 0)?)?;
            let elements: Sequence = set.iter().cloned().collect();
            Ok(elements.random(rng).cloned().unwrap_or_else(Term::empty))
        }
        Op::ElementNotIn => {
            let ty = arg(op, args, 0)?;
            let set = expect_set(op, arg(op, args, 1)?)?;
            let ty = ty
                .as_type()
                .ok_or_else(|| stuck(op, format!("expected a type, found {ty}")))?;
            element_not_in(op, ty, set)
        }
        _ => Err(no_rule(op)),
    }
}

/// The first atom `@0`, `@1`, ... for which `excluded` does not hold.
pub(super) fn fresh_atom(excluded: impl Fn(&Term) -> bool) -> Term {
    (0u64..)
        .map(|index| Term::atom(&format!("@{index}")))
        .find(|atom| !excluded(atom))
        .unwrap_or_else(Term::empty)
}

/// A value of `ty` outside `set`, or `()` when the type is exhausted.
fn element_not_in(op: Op, ty: &Type, set: &Elements) -> Result<Term, Stuck> {
    let fresh = |mut candidates: Box<dyn Iterator<Item = Term>>| {
        candidates
            .find(|candidate| !set.contains(candidate))
            .unwrap_or_else(Term::empty)
    };

    match ty {
        Type::Booleans => Ok(fresh(Box::new([false, true].into_iter().map(Term::Bool)))),
        Type::Integers | Type::NaturalNumbers => Ok(fresh(Box::new((0i64..).map(Term::Int)))),
        Type::Characters => Ok(fresh(Box::new(('a'..='z').map(Term::Char)))),
        Type::Atoms => Ok(fresh_atom(|atom| set.contains(atom))),
        other => Err(stuck(op, format!("cannot enumerate {other}"))),
    }
}

fn expect_set(op: Op, term: &Term) -> Result<&Elements, Stuck> {
    match term {
        Term::Set(set) => Ok(set.as_ref()),
        other => Err(stuck(op, format!("expected a set, found {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(values: &[i64]) -> Term {
        Term::set(values.iter().copied().map(Term::Int).collect())
    }

    fn run(op: Op, args: &[Term]) -> Result<Term, Stuck> {
        apply(op, args, &mut ChoiceRng::new(1))
    }

    #[test]
    fn test_set_deduplicates() {
        let args = [Term::Seq(Sequence::new([Term::Int(2), Term::Int(1), Term::Int(2)]))];
        assert_eq!(run(Op::Set, &args), Ok(set_of(&[1, 2])));
        assert_eq!(run(Op::SetSize, &[set_of(&[1, 2])]), Ok(Term::Int(2)));
    }

    #[test]
    fn test_difference_and_insert() {
        assert_eq!(
            run(Op::SetDifference, &[set_of(&[1, 2, 3]), set_of(&[2])]),
            Ok(set_of(&[1, 3]))
        );
        assert_eq!(
            run(Op::SetInsert, &[Term::Int(4), set_of(&[1])]),
            Ok(set_of(&[1, 4]))
        );
    }

    #[test]
    fn test_some_element_of_empty_set() {
        assert_eq!(run(Op::SomeElement, &[set_of(&[])]), Ok(Term::empty()));
        assert_eq!(run(Op::SomeElement, &[set_of(&[9])]), Ok(Term::Int(9)));
    }

    #[test]
    fn test_element_not_in() {
        let integers = Term::ty(Type::Integers);
        assert_eq!(
            run(Op::ElementNotIn, &[integers, set_of(&[0, 1, 3])]),
            Ok(Term::Int(2))
        );

        let booleans = Term::ty(Type::Booleans);
        let both = Term::set([Term::Bool(false), Term::Bool(true)].into_iter().collect());
        assert_eq!(run(Op::ElementNotIn, &[booleans, both]), Ok(Term::empty()));

        let atoms = Term::ty(Type::Atoms);
        let used = Term::set([Term::atom("@0")].into_iter().collect());
        assert_eq!(run(Op::ElementNotIn, &[atoms, used]), Ok(Term::atom("@1")));
    }
}
