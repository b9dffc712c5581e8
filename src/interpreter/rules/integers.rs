use crate::catalog::Op;
use crate::error::Stuck;
use crate::term::Term;

use super::{arg, integer, no_rule, sequence, stuck};

pub(super) fn apply(op: Op, args: &[Term]) -> Result<Term, Stuck> {
    let overflow = || stuck(op, "integer overflow");

    match op {
        Op::IntegerAdd => {
            let mut sum: i64 = 0;
            for operand in sequence(op, args, 0)? {
                sum = sum.checked_add(integer(op, operand)?).ok_or_else(overflow)?;
            }
            Ok(Term::Int(sum))
        }
        Op::IntegerMultiply => {
            let mut product: i64 = 1;
            for operand in sequence(op, args, 0)? {
                product = product
                    .checked_mul(integer(op, operand)?)
                    .ok_or_else(overflow)?;
            }
            Ok(Term::Int(product))
        }
        Op::IntegerSubtract => {
            let (a, b) = pair(op, args)?;
            a.checked_sub(b).map(Term::Int).ok_or_else(overflow)
        }
        // Division and modulo by zero have no value: the result is ().
        Op::IntegerDivide => {
            let (a, b) = pair(op, args)?;
            if b == 0 {
                return Ok(Term::empty());
            }
            a.checked_div(b).map(Term::Int).ok_or_else(overflow)
        }
        Op::IntegerModulo => {
            let (a, b) = pair(op, args)?;
            if b == 0 {
                return Ok(Term::empty());
            }
            a.checked_rem(b).map(Term::Int).ok_or_else(overflow)
        }
        Op::IntegerPower => {
            let (base, exponent) = pair(op, args)?;
            let exponent = u32::try_from(exponent)
                .map_err(|_| stuck(op, format!("negative exponent {exponent}")))?;
            base.checked_pow(exponent).map(Term::Int).ok_or_else(overflow)
        }
        Op::IntegerAbsoluteValue => integer(op, arg(op, args, 0)?)?
            .checked_abs()
            .map(Term::Int)
            .ok_or_else(overflow),
        Op::IntegerNegate => integer(op, arg(op, args, 0)?)?
            .checked_neg()
            .map(Term::Int)
            .ok_or_else(overflow),
        Op::IntegerIsLess => compare(op, args, |a, b| a < b),
        Op::IntegerIsGreater => compare(op, args, |a, b| a > b),
        Op::IntegerIsLessOrEqual => compare(op, args, |a, b| a <= b),
        Op::IntegerIsGreaterOrEqual => compare(op, args, |a, b| a >= b),
        Op::NaturalSuccessor => {
            let n = natural(op, arg(op, args, 0)?)?;
            n.checked_add(1).map(Term::Int).ok_or_else(overflow)
        }
        Op::NaturalPredecessor => match natural(op, arg(op, args, 0)?)? {
            0 => Ok(Term::empty()),
            n => Ok(Term::Int(n - 1)),
        },
        _ => Err(no_rule(op)),
    }
}

fn pair(op: Op, args: &[Term]) -> Result<(i64, i64), Stuck> {
    Ok((integer(op, arg(op, args, 0)?)?, integer(op, arg(op, args, 1)?)?))
}

fn compare(op: Op, args: &[Term], holds: impl Fn(i64, i64) -> bool) -> Result<Term, Stuck> {
    let (a, b) = pair(op, args)?;
    Ok(Term::Bool(holds(a, b)))
}

fn natural(op: Op, term: &Term) -> Result<i64, Stuck> {
    match integer(op, term)? {
        n if n >= 0 => Ok(n),
        n => Err(stuck(op, format!("{n} is not a natural number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Sequence;

    fn ints(values: &[i64]) -> Vec<Term> {
        values.iter().copied().map(Term::Int).collect()
    }

    #[test]
    fn test_add_and_multiply_are_variadic() {
        let operands = vec![Term::Seq(Sequence::new(ints(&[1, 2, 3, 4])))];
        assert_eq!(apply(Op::IntegerAdd, &operands), Ok(Term::Int(10)));
        assert_eq!(apply(Op::IntegerMultiply, &operands), Ok(Term::Int(24)));
        assert_eq!(
            apply(Op::IntegerAdd, &[Term::empty()]),
            Ok(Term::Int(0))
        );
    }

    #[test]
    fn test_divide_by_zero_is_empty() {
        assert_eq!(apply(Op::IntegerDivide, &ints(&[7, 0])), Ok(Term::empty()));
        assert_eq!(apply(Op::IntegerDivide, &ints(&[7, 2])), Ok(Term::Int(3)));
        assert_eq!(apply(Op::IntegerModulo, &ints(&[7, 0])), Ok(Term::empty()));
    }

    #[test]
    fn test_negative_exponent_is_stuck() {
        assert_eq!(apply(Op::IntegerPower, &ints(&[2, 10])), Ok(Term::Int(1024)));
        assert!(apply(Op::IntegerPower, &ints(&[2, -1])).is_err());
    }

    #[test]
    fn test_overflow_is_stuck() {
        assert!(apply(Op::IntegerSubtract, &ints(&[i64::MIN, 1])).is_err());
        assert!(apply(Op::IntegerAbsoluteValue, &ints(&[i64::MIN])).is_err());
    }

    #[test]
    fn test_natural_predecessor() {
        assert_eq!(apply(Op::NaturalPredecessor, &ints(&[3])), Ok(Term::Int(2)));
        assert_eq!(apply(Op::NaturalPredecessor, &ints(&[0])), Ok(Term::empty()));
        assert!(apply(Op::NaturalPredecessor, &ints(&[-3])).is_err());
    }
}
