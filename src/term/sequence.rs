use std::rc::Rc;

use crate::error::SequenceError;
use crate::rng::ChoiceRng;

use super::Term;

/// An ordered, flat collection of terms.
///
/// Construction flattens nested sequences (and spread markers) one level,
/// so a `Sequence` never holds another sequence as a direct element.
/// The backing slice is shared, so cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(Rc<[Term]>);

impl Default for Sequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl Sequence {
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut flat = Vec::new();
        for term in terms {
            match term {
                Term::Seq(inner) | Term::Spread(inner) => flat.extend(inner.iter().cloned()),
                other => flat.push(other),
            }
        }
        Self(flat.into())
    }

    pub fn empty() -> Self {
        Self(Rc::from(Vec::new()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Term] {
        &self.0
    }

    /// Element at `index`, or the empty sequence when out of range.
    pub fn get(&self, index: usize) -> Term {
        self.0.get(index).cloned().unwrap_or_else(Term::empty)
    }

    pub fn head(&self) -> Term {
        self.get(0)
    }

    pub fn second(&self) -> Term {
        self.get(1)
    }

    pub fn third(&self) -> Term {
        self.get(2)
    }

    pub fn fourth(&self) -> Term {
        self.get(3)
    }

    pub fn last(&self) -> Option<&Term> {
        self.0.last()
    }

    /// Everything but the first element; empty stays empty.
    pub fn tail(&self) -> Sequence {
        match self.0.split_first() {
            Some((_, rest)) => Self(rest.into()),
            None => Self::empty(),
        }
    }

    /// Everything but the last element; empty stays empty.
    pub fn init(&self) -> Sequence {
        match self.0.split_last() {
            Some((_, rest)) => Self(rest.into()),
            None => Self::empty(),
        }
    }

    /// The elements `[start, len - end_offset)`.
    ///
    /// Bounds are never clamped: an offset past the end or a start past the
    /// computed end is rejected.
    pub fn slice_from(&self, start: usize, end_offset: usize) -> Result<Sequence, SequenceError> {
        let len = self.len();
        let invalid = SequenceError::InvalidSlice {
            start,
            end_offset,
            len,
        };
        let end = len.checked_sub(end_offset).ok_or(invalid.clone())?;
        if start > end {
            return Err(invalid);
        }
        Ok(Self(self.0[start..end].into()))
    }

    /// Split off the first element, yielding `null-value` when empty.
    pub fn pop_first(&self) -> (Term, Sequence) {
        match self.0.split_first() {
            Some((first, rest)) => (first.clone(), Self(rest.into())),
            None => (Term::Null, Self::empty()),
        }
    }

    /// A uniformly chosen element. Callers guard against the empty case.
    pub fn random(&self, rng: &mut ChoiceRng) -> Option<&Term> {
        if self.is_empty() {
            return None;
        }
        self.0.get(rng.next_index(self.len()))
    }

    pub fn append(&self, other: &Sequence) -> Sequence {
        Self(self.0.iter().chain(other.0.iter()).cloned().collect())
    }

    /// Replace the element at `index`, splicing the replacement if it is a
    /// sequence itself.
    pub fn replace(&self, index: usize, term: Term) -> Sequence {
        let mut term = Some(term);
        Sequence::new(self.0.iter().enumerate().map(|(i, existing)| {
            if i == index {
                term.take().unwrap_or_else(Term::empty)
            } else {
                existing.clone()
            }
        }))
    }

    pub fn reversed(&self) -> Sequence {
        Self(self.0.iter().rev().cloned().collect())
    }
}

impl FromIterator<Term> for Sequence {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Sequence::new(iter)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
