use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Op;
use crate::error::Stuck;
use crate::term::{Sequence, TUPLE, Term};

use super::{arg, no_rule, sequence, stuck};

type Entries = BTreeMap<Term, Sequence>;

pub(super) fn apply(op: Op, args: &[Term]) -> Result<Term, Stuck> {
    match op {
        Op::Map => {
            let mut entries = Entries::new();
            for tuple in sequence(op, args, 0)? {
                let parts = tuple
                    .datatype_args(TUPLE)
                    .filter(|parts| !parts.is_empty())
                    .ok_or_else(|| stuck(op, format!("expected a key tuple, found {tuple}")))?;
                if entries.insert(parts.head(), parts.tail()).is_some() {
                    // keys must be distinct
                    return Ok(Term::empty());
                }
            }
            Ok(Term::map(entries))
        }
        Op::MapEmpty => Ok(Term::map(Entries::new())),
        Op::MapLookup => {
            let map = expect_map(op, arg(op, args, 0)?)?;
            let key = arg(op, args, 1)?;
            Ok(map
                .get(key)
                .cloned()
                .map_or_else(Term::empty, Term::from_sequence))
        }
        Op::MapOverride => {
            // earlier maps take precedence
            let mut entries = Entries::new();
            for map in sequence(op, args, 0)? {
                for (key, value) in expect_map(op, map)? {
                    entries
                        .entry(key.clone())
                        .or_insert_with(|| value.clone());
                }
            }
            Ok(Term::map(entries))
        }
        Op::MapUnite => {
            let mut entries = Entries::new();
            for map in sequence(op, args, 0)? {
                for (key, value) in expect_map(op, map)? {
                    if entries.insert(key.clone(), value.clone()).is_some() {
                        // domains overlap
                        return Ok(Term::empty());
                    }
                }
            }
            Ok(Term::map(entries))
        }
        Op::MapDomain => {
            let map = expect_map(op, arg(op, args, 0)?)?;
            Ok(Term::set(map.keys().cloned().collect()))
        }
        Op::MapElements => {
            let map = expect_map(op, arg(op, args, 0)?)?;
            Ok(Term::Spread(
                map.iter()
                    .map(|(key, value)| {
                        Term::tuple(std::iter::once(key.clone()).chain(value.iter().cloned()))
                    })
                    .collect(),
            ))
        }
        Op::MapDelete => {
            let map = expect_map(op, arg(op, args, 0)?)?;
            let removed: BTreeSet<Term> = match arg(op, args, 1)? {
                Term::Set(keys) => (**keys).clone(),
                other => return Err(stuck(op, format!("expected a set of keys, found {other}"))),
            };
            Ok(Term::map(
                map.iter()
                    .filter(|(key, _)| !removed.contains(*key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ))
        }
        _ => Err(no_rule(op)),
    }
}

fn expect_map(op: Op, term: &Term) -> Result<&Entries, Stuck> {
    match term {
        Term::Map(map) => Ok(map.as_ref()),
        other => Err(stuck(op, format!("expected a map, found {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: i64, value: &str) -> Term {
        Term::tuple([Term::Int(key), Term::string(value)])
    }

    fn map_of(entries: &[Term]) -> Term {
        apply(Op::Map, &[Term::Seq(entries.iter().cloned().collect())]).unwrap()
    }

    #[test]
    fn test_lookup_present_and_missing() {
        let map = map_of(&[entry(1, "a")]);
        assert_eq!(
            apply(Op::MapLookup, &[map.clone(), Term::Int(1)]),
            Ok(Term::string("a"))
        );
        assert_eq!(
            apply(Op::MapLookup, &[map, Term::Int(2)]),
            Ok(Term::empty())
        );
    }

    #[test]
    fn test_key_only_tuple_maps_to_nothing() {
        let map = map_of(&[Term::tuple([Term::Int(1)])]);
        assert_eq!(
            apply(Op::MapLookup, &[map, Term::Int(1)]),
            Ok(Term::empty())
        );
    }

    #[test]
    fn test_duplicate_keys_have_no_map() {
        let result = apply(
            Op::Map,
            &[Term::Seq(Sequence::new([entry(1, "a"), entry(1, "b")]))],
        );
        assert_eq!(result, Ok(Term::empty()));
    }

    #[test]
    fn test_override_prefers_first() {
        let first = map_of(&[entry(1, "a")]);
        let second = map_of(&[entry(1, "b"), entry(2, "c")]);
        let merged = apply(
            Op::MapOverride,
            &[Term::Seq(Sequence::new([first, second]))],
        )
        .unwrap();
        assert_eq!(merged, map_of(&[entry(1, "a"), entry(2, "c")]));
    }

    #[test]
    fn test_unite_rejects_overlap() {
        let first = map_of(&[entry(1, "a")]);
        let second = map_of(&[entry(1, "b")]);
        let result = apply(Op::MapUnite, &[Term::Seq(Sequence::new([first, second]))]);
        assert_eq!(result, Ok(Term::empty()));
    }

    #[test]
    fn test_domain_and_delete() {
        let map = map_of(&[entry(1, "a"), entry(2, "b")]);
        let domain = apply(Op::MapDomain, &[map.clone()]).unwrap();
        assert_eq!(
            domain,
            Term::set([Term::Int(1), Term::Int(2)].into_iter().collect())
        );

        let keys = Term::set([Term::Int(1)].into_iter().collect());
        assert_eq!(
            apply(Op::MapDelete, &[map, keys]),
            Ok(map_of(&[entry(2, "b")]))
        );
    }
}
