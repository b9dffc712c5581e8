use indexmap::IndexMap;

use crate::catalog::{EntityKind, entity_kind};
use crate::term::{Sequence, Term};

/// A copy of every entity, taken before a speculative reduction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot(IndexMap<String, Term>);

impl Snapshot {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-execution state threaded through reduction.
///
/// Entries are created on first write. Reading an unset entity yields the
/// empty sequence.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entries: IndexMap<String, Term>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `name`, or `()` when unset
    pub fn get(&self, name: &str) -> Term {
        self.entries.get(name).cloned().unwrap_or_else(Term::empty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Overwrite `name`
    pub fn put(&mut self, name: impl ToString, value: Term) {
        self.entries.insert(name.to_string(), value);
    }

    /// Concatenate `value` onto the current contents of `name`
    pub fn append(&mut self, name: impl ToString, value: Term) {
        let name = name.to_string();
        let current = self.get(&name).into_sequence();
        let appended = current.append(&value.into_sequence());
        self.entries.insert(name, Term::Seq(appended));
    }

    /// Drop `name`, returning what it held
    pub fn remove(&mut self, name: &str) -> Option<Term> {
        self.entries.shift_remove(name)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.entries.clone())
    }

    /// Replace every entity with the contents of `snapshot`
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.entries = snapshot.0;
    }

    /// Key-by-key structural equality.
    pub fn snapshots_equal(a: &Snapshot, b: &Snapshot) -> bool {
        a.0.len() == b.0.len()
            && a.0
                .iter()
                .all(|(name, value)| b.0.get(name).is_some_and(|other| other == value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    // Typed access per entity kind. The kind of a catalog entity is fixed;
    // using an accessor of the wrong kind is a programming error.

    /// Install a contextual value, returning the one it shadows.
    pub fn bind_contextual(&mut self, name: &str, value: Term) -> Option<Term> {
        debug_assert_kind(name, EntityKind::Contextual);
        self.entries.insert(name.to_string(), value)
    }

    /// Reinstate whatever [`bind_contextual`](Self::bind_contextual) shadowed.
    pub fn unbind_contextual(&mut self, name: &str, previous: Option<Term>) {
        debug_assert_kind(name, EntityKind::Contextual);
        match previous {
            Some(value) => {
                self.entries.insert(name.to_string(), value);
            }
            None => {
                self.entries.shift_remove(name);
            }
        }
    }

    pub fn contextual(&self, name: &str) -> Option<&Term> {
        debug_assert_kind(name, EntityKind::Contextual);
        self.entries.get(name)
    }

    pub fn mutable(&self, name: &str) -> Term {
        debug_assert_kind(name, EntityKind::Mutable);
        self.get(name)
    }

    pub fn set_mutable(&mut self, name: &str, value: Term) {
        debug_assert_kind(name, EntityKind::Mutable);
        self.put(name, value);
    }

    pub fn append_mutable(&mut self, name: &str, value: Term) {
        debug_assert_kind(name, EntityKind::Mutable);
        self.append(name, value);
    }

    /// Take the first element of a stream entity, `None` once exhausted.
    pub fn pop_input(&mut self, name: &str) -> Option<Term> {
        debug_assert_kind(name, EntityKind::Mutable);
        let stream = self.get(name).into_sequence();
        if stream.is_empty() {
            return None;
        }
        let (first, rest) = stream.pop_first();
        self.put(name, Term::Seq(rest));
        Some(first)
    }

    /// Raise a control signal.
    pub fn signal(&mut self, name: &str, value: Term) {
        debug_assert_kind(name, EntityKind::Control);
        self.put(name, value);
    }

    /// Read and clear a control signal.
    pub fn take_signal(&mut self, name: &str) -> Option<Term> {
        debug_assert_kind(name, EntityKind::Control);
        self.entries.shift_remove(name)
    }

    /// Elements accumulated in an output-style entity.
    pub fn output(&self, name: &str) -> Sequence {
        self.get(name).into_sequence()
    }
}

fn debug_assert_kind(name: &str, kind: EntityKind) {
    debug_assert!(
        entity_kind(name).is_none_or(|declared| declared == kind),
        "entity `{name}` is not {kind:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GIVEN_VALUE, STANDARD_IN, STANDARD_OUT, YIELDED};

    #[test]
    fn test_unset_entity_is_empty_sequence() {
        let store = EntityStore::new();
        assert_eq!(store.get("anything"), Term::empty());
    }

    #[test]
    fn test_append_concatenates() {
        let mut store = EntityStore::new();
        store.append_mutable(STANDARD_OUT, Term::Int(1));
        store.append_mutable(
            STANDARD_OUT,
            Term::Seq(Sequence::new([Term::Int(2), Term::Int(3)])),
        );
        assert_eq!(
            store.output(STANDARD_OUT),
            Sequence::new([Term::Int(1), Term::Int(2), Term::Int(3)])
        );
    }

    #[test]
    fn test_restore_is_verbatim() {
        let mut store = EntityStore::new();
        store.put(STANDARD_OUT, Term::Int(1));
        let before = store.snapshot();

        store.put(STANDARD_OUT, Term::Int(2));
        store.signal(YIELDED, Term::signal());
        assert!(!EntityStore::snapshots_equal(&before, &store.snapshot()));

        store.restore(before.clone());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_contextual_binding_is_scoped() {
        let mut store = EntityStore::new();
        let outer = store.bind_contextual(GIVEN_VALUE, Term::Int(1));
        let inner = store.bind_contextual(GIVEN_VALUE, Term::Int(2));
        assert_eq!(store.contextual(GIVEN_VALUE), Some(&Term::Int(2)));

        store.unbind_contextual(GIVEN_VALUE, inner);
        assert_eq!(store.contextual(GIVEN_VALUE), Some(&Term::Int(1)));
        store.unbind_contextual(GIVEN_VALUE, outer);
        assert!(!store.contains(GIVEN_VALUE));
    }

    #[test]
    fn test_signal_is_cleared_on_take() {
        let mut store = EntityStore::new();
        store.signal(YIELDED, Term::signal());
        assert_eq!(store.take_signal(YIELDED), Some(Term::signal()));
        assert_eq!(store.take_signal(YIELDED), None);
    }

    #[test]
    fn test_pop_input() {
        let mut store = EntityStore::new();
        store.append_mutable(STANDARD_IN, Term::Int(5));
        assert_eq!(store.pop_input(STANDARD_IN), Some(Term::Int(5)));
        assert_eq!(store.pop_input(STANDARD_IN), None);
    }
}
