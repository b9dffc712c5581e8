use crate::catalog::Op;
use crate::error::Stuck;
use crate::term::Term;
use crate::types::belongs_to;

use super::{arg, boolean, no_rule, sequence, stuck};

pub(super) fn apply(op: Op, args: &[Term]) -> Result<Term, Stuck> {
    match op {
        Op::Not => Ok(Term::Bool(!boolean(op, arg(op, args, 0)?)?)),
        Op::And => {
            for operand in sequence(op, args, 0)? {
                if !boolean(op, operand)? {
                    return Ok(Term::Bool(false));
                }
            }
            Ok(Term::Bool(true))
        }
        Op::Or => {
            for operand in sequence(op, args, 0)? {
                if boolean(op, operand)? {
                    return Ok(Term::Bool(true));
                }
            }
            Ok(Term::Bool(false))
        }
        Op::Implies => {
            let (p, q) = pair(op, args)?;
            Ok(Term::Bool(!p || q))
        }
        Op::ExclusiveOr => {
            let (p, q) = pair(op, args)?;
            Ok(Term::Bool(p != q))
        }
        Op::IsEqual => Ok(Term::Bool(arg(op, args, 0)? == arg(op, args, 1)?)),
        Op::IsInType => {
            let value = arg(op, args, 0)?;
            let ty = arg(op, args, 1)?;
            let ty = ty
                .as_type()
                .ok_or_else(|| stuck(op, format!("expected a type, found {ty}")))?;
            Ok(Term::Bool(belongs_to(value, ty)))
        }
        _ => Err(no_rule(op)),
    }
}

fn pair(op: Op, args: &[Term]) -> Result<(bool, bool), Stuck> {
    Ok((
        boolean(op, arg(op, args, 0)?)?,
        boolean(op, arg(op, args, 1)?)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Sequence;
    use crate::types::Type;

    fn operands(values: &[Term]) -> Vec<Term> {
        vec![Term::Seq(Sequence::new(values.iter().cloned()))]
    }

    #[test]
    fn test_and_of_nothing_is_true() {
        assert_eq!(apply(Op::And, &operands(&[])), Ok(Term::Bool(true)));
    }

    #[test]
    fn test_and_stops_at_first_false() {
        let args = operands(&[Term::Bool(false), Term::Int(3)]);
        assert_eq!(apply(Op::And, &args), Ok(Term::Bool(false)));
    }

    #[test]
    fn test_or_rejects_non_booleans() {
        let args = operands(&[Term::Int(1)]);
        assert!(apply(Op::Or, &args).is_err());
    }

    #[test]
    fn test_implies_truth_table() {
        let cases = [
            (false, false, true),
            (false, true, true),
            (true, false, false),
            (true, true, true),
        ];
        for (p, q, expected) in cases {
            let result = apply(Op::Implies, &[Term::Bool(p), Term::Bool(q)]);
            assert_eq!(result, Ok(Term::Bool(expected)));
        }
    }

    #[test]
    fn test_is_in_type_needs_a_type() {
        let result = apply(Op::IsInType, &[Term::Int(1), Term::ty(Type::Integers)]);
        assert_eq!(result, Ok(Term::Bool(true)));
        assert!(apply(Op::IsInType, &[Term::Int(1), Term::Int(2)]).is_err());
    }
}
