use crate::term::{Sequence, Term};

use super::ty::Type;

/// Decide whether `term` belongs to `ty`.
///
/// Total over every term and every type: sequences and unevaluated nodes
/// simply belong to nothing except complements. Container types check
/// every element against the element type.
pub fn belongs_to(term: &Term, ty: &Type) -> bool {
    match ty {
        Type::Values => term.is_value() && !term.is_sequence(),
        Type::ValueTypes => matches!(term, Term::Type(_)),
        Type::GroundValues => is_ground(term),
        Type::Empty => false,
        Type::Null => matches!(term, Term::Null),
        Type::Booleans => matches!(term, Term::Bool(_)),
        Type::Integers => matches!(term, Term::Int(_)),
        Type::NaturalNumbers => matches!(term, Term::Int(n) if *n >= 0),
        Type::Characters => matches!(term, Term::Char(_)),
        Type::Strings => term.as_string().is_some(),
        Type::Atoms => matches!(term, Term::Atom(_)),
        Type::DatatypeValues => matches!(term, Term::Data(_)),
        Type::Maps(key, value) => match term {
            Term::Map(map) => map
                .iter()
                .all(|(k, v)| belongs_to(k, key) && all_belong(v, value)),
            _ => false,
        },
        Type::Sets(element) => match term {
            Term::Set(set) => set.iter().all(|e| belongs_to(e, element)),
            _ => false,
        },
        Type::Lists(element) => term
            .datatype_args("list")
            .is_some_and(|args| all_belong(args, element)),
        Type::Vectors(element) => term
            .datatype_args("vector")
            .is_some_and(|args| all_belong(args, element)),
        Type::Tuples(elements) => term.datatype_args("tuple").is_some_and(|args| {
            args.len() == elements.len() && args.iter().zip(elements).all(|(a, t)| belongs_to(a, t))
        }),
        Type::Union(types) => types.iter().any(|t| belongs_to(term, t)),
        Type::Intersection(types) => types.iter().all(|t| belongs_to(term, t)),
        Type::Complement(inner) => !belongs_to(term, inner),
    }
}

fn all_belong(sequence: &Sequence, ty: &Type) -> bool {
    sequence.iter().all(|term| belongs_to(term, ty))
}

fn is_ground(term: &Term) -> bool {
    match term {
        Term::Null | Term::Bool(_) | Term::Int(_) | Term::Char(_) | Term::Atom(_) => true,
        Term::Data(data) => data.args.iter().all(is_ground),
        Term::Map(map) => map
            .iter()
            .all(|(k, v)| is_ground(k) && v.iter().all(is_ground)),
        Term::Set(set) => set.iter().all(is_ground),
        Term::Type(_) | Term::Seq(_) | Term::Spread(_) | Term::Node(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_numbers_are_non_negative_integers() {
        assert!(belongs_to(&Term::Int(0), &Type::NaturalNumbers));
        assert!(!belongs_to(&Term::Int(-1), &Type::NaturalNumbers));
        assert!(belongs_to(&Term::Int(-1), &Type::Integers));
    }

    #[test]
    fn test_strings_are_character_lists() {
        assert!(belongs_to(&Term::string("abc"), &Type::Strings));
        assert!(belongs_to(
            &Term::string("abc"),
            &Type::lists(Type::Characters)
        ));
        assert!(!belongs_to(&Term::Int(3), &Type::Strings));
    }

    #[test]
    fn test_sequences_are_not_values() {
        let pair = Term::Seq(Sequence::new([Term::Int(1), Term::Int(2)]));
        assert!(!belongs_to(&pair, &Type::Values));
        assert!(belongs_to(&pair, &Type::complement(Type::Values)));
    }

    #[test]
    fn test_types_are_not_ground() {
        let ty = Term::ty(Type::Booleans);
        assert!(belongs_to(&ty, &Type::ValueTypes));
        assert!(belongs_to(&ty, &Type::Values));
        assert!(!belongs_to(&ty, &Type::GroundValues));
    }

    #[test]
    fn test_tuples_check_each_position() {
        let tuple = Term::tuple([Term::Bool(true), Term::Int(4)]);
        let ty = Type::Tuples(vec![Type::Booleans, Type::Integers]);
        assert!(belongs_to(&tuple, &ty));
        assert!(!belongs_to(&tuple, &Type::Tuples(vec![Type::Booleans])));
    }

    #[test]
    fn test_union_intersection_complement_follow_membership() {
        let terms = [
            Term::Int(0),
            Term::Int(-1),
            Term::Bool(false),
            Term::Char('x'),
            Term::string("abc"),
            Term::atom("cell"),
            Term::Null,
            Term::empty(),
            Term::ty(Type::Integers),
            Term::set([Term::Int(1)].into_iter().collect()),
            Term::map(
                [(Term::Int(1), Sequence::new([Term::Bool(true)]))]
                    .into_iter()
                    .collect(),
            ),
            Term::tuple([Term::Int(1), Term::Char('a')]),
        ];
        let types = [
            Type::Integers,
            Type::NaturalNumbers,
            Type::Booleans,
            Type::Strings,
            Type::Atoms,
            Type::Values,
            Type::GroundValues,
            Type::lists(Type::Characters),
            Type::Empty,
        ];

        for term in &terms {
            for left in &types {
                let in_left = belongs_to(term, left);
                assert_eq!(
                    belongs_to(term, &Type::complement(left.clone())),
                    !in_left,
                    "{term} against ~{}",
                    left.pretty()
                );
                for right in &types {
                    let in_right = belongs_to(term, right);
                    let union = Type::union(left.clone(), right.clone());
                    let both = Type::intersection(left.clone(), right.clone());
                    assert_eq!(
                        belongs_to(term, &union),
                        in_left || in_right,
                        "{term} against {}",
                        union.pretty()
                    );
                    assert_eq!(
                        belongs_to(term, &both),
                        in_left && in_right,
                        "{term} against {}",
                        both.pretty()
                    );
                }
            }
        }
    }
}
