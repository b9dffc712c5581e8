//! Interning of atomic and datatype values.
//!
//! Structurally equal atoms, strings and datatype values built through this
//! cache share one allocation while any of them is alive, and `Rc::ptr_eq`
//! holds between them. Integers, booleans and characters are unboxed and
//! need no interning.
//!
//! The tables hold weak references only. A value is dropped with the last
//! term that uses it, and dead entries are pruned as the tables grow, so
//! nothing built during one execution outlives it.
//!
//! The cache is thread-local; terms are `Rc`-based and never cross threads.

use std::cell::RefCell;
use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;
use std::rc::{Rc, Weak};

use super::{Datatype, Sequence, Term};

/// Insertions between two sweeps of dead entries.
const PRUNE_INTERVAL: usize = 1024;

#[derive(Default)]
struct ValueCache {
    hasher: RandomState,
    names: HashSet<Rc<str>>,
    atoms: HashMap<Box<str>, Weak<str>>,
    datatypes: HashMap<u64, Vec<Weak<Datatype>>>,
    inserted: usize,
}

impl ValueCache {
    fn name(&mut self, name: &str) -> Rc<str> {
        if let Some(existing) = self.names.get(name) {
            return Rc::clone(existing);
        }
        let name: Rc<str> = Rc::from(name);
        self.names.insert(Rc::clone(&name));
        name
    }

    fn note_insert(&mut self) {
        self.inserted += 1;
        if self.inserted >= PRUNE_INTERVAL {
            self.prune();
        }
    }

    fn prune(&mut self) {
        self.atoms.retain(|_, atom| atom.strong_count() > 0);
        self.datatypes.retain(|_, bucket| {
            bucket.retain(|data| data.strong_count() > 0);
            !bucket.is_empty()
        });
        // the set itself holds one reference
        self.names.retain(|name| Rc::strong_count(name) > 1);
        self.inserted = 0;
    }
}

thread_local! {
    static CACHE: RefCell<ValueCache> = RefCell::new(ValueCache::default());
}

pub fn atom(name: &str) -> Term {
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(existing) = cache.atoms.get(name).and_then(Weak::upgrade) {
            return Term::Atom(existing);
        }
        let atom: Rc<str> = Rc::from(name);
        cache.atoms.insert(name.into(), Rc::downgrade(&atom));
        cache.note_insert();
        Term::Atom(atom)
    })
}

pub fn datatype(name: &str, args: Sequence) -> Term {
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        let name = cache.name(name);
        let hash = cache.hasher.hash_one((&*name, &args));

        let bucket = cache.datatypes.entry(hash).or_default();
        let existing = bucket
            .iter()
            .filter_map(Weak::upgrade)
            .find(|data| data.name == name && data.args == args);
        if let Some(existing) = existing {
            return Term::Data(existing);
        }

        let data = Rc::new(Datatype { name, args });
        bucket.push(Rc::downgrade(&data));
        cache.note_insert();
        Term::Data(data)
    })
}

/// Number of interned values on this thread that are still alive.
pub fn len() -> usize {
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        cache.prune();
        cache.atoms.len() + cache.datatypes.values().map(Vec::len).sum::<usize>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_share_allocation() {
        let (Term::Atom(a), Term::Atom(b)) = (atom("cell"), atom("cell")) else {
            panic!("expected atoms");
        };
        assert!(Rc::ptr_eq(&a, &b));

        let first = datatype("tuple", Sequence::new([Term::Int(1)]));
        let second = datatype("tuple", Sequence::new([Term::Int(1)]));
        let (Term::Data(x), Term::Data(y)) = (&first, &second) else {
            panic!("expected datatypes");
        };
        assert!(Rc::ptr_eq(x, y));
    }

    #[test]
    fn test_len_counts_live_values() {
        let before = len();
        let kept = atom("only-once");
        let again = atom("only-once");
        assert_eq!(len(), before + 1);

        drop((kept, again));
        assert_eq!(len(), before);
    }

    #[test]
    fn test_dropped_datatypes_are_pruned() {
        let before = len();
        for n in 0..(2 * PRUNE_INTERVAL as i64) {
            datatype("tuple", Sequence::new([Term::Int(n)]));
        }
        assert_eq!(len(), before);
    }
}
