//! # Term Representation
//!
//! Every program state is a [`Term`]: either a value (booleans, integers,
//! characters, atoms, datatype values such as tuples and lists, maps, sets,
//! types, the null marker), a flat [`Sequence`] of terms, or a [`Node`]
//! applying a catalog operator to its parameters.
//!
//! Terms are immutable. Rewriting builds new terms and shares unchanged
//! children through `Rc`. Equality, hashing and ordering are structural.
//!
//! ## Strings
//!
//! A string is a `list` datatype value of characters. `Term::string("ab")`
//! and `list('a','b')` are the same value.
//!
//! ## Spread
//!
//! [`Term::Spread`] is the marker produced by operators such as
//! `tuple-elements`: when it is the value of an eager parameter, its
//! elements are spliced into the parent's parameter list.

pub mod cache;
pub mod sequence;

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::catalog::Op;
use crate::types::Type;

pub use sequence::Sequence;

pub const LIST: &str = "list";
pub const TUPLE: &str = "tuple";
pub const VECTOR: &str = "vector";
pub const VARIABLE: &str = "variable";
pub const SIGNAL: &str = "signal";

/// A value built by a named datatype constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Datatype {
    pub name: Rc<str>,
    pub args: Sequence,
}

/// An operator applied to its parameters.
///
/// `params` has one entry per declared parameter of `op`. A sequence
/// parameter holds a [`Term::Seq`] with every argument it absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    pub op: Op,
    pub params: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Null,
    Bool(bool),
    Int(i64),
    Char(char),
    Atom(Rc<str>),
    Data(Rc<Datatype>),
    Map(Rc<BTreeMap<Term, Sequence>>),
    Set(Rc<BTreeSet<Term>>),
    Type(Rc<Type>),
    Seq(Sequence),
    Spread(Sequence),
    Node(Rc<Node>),
}

impl Term {
    /// The empty sequence `()`.
    pub fn empty() -> Self {
        Term::Seq(Sequence::empty())
    }

    /// A rule result: a single element stands for itself.
    pub fn from_sequence(sequence: Sequence) -> Self {
        if sequence.len() == 1 {
            sequence.head()
        } else {
            Term::Seq(sequence)
        }
    }

    pub fn node(op: Op, params: Vec<Term>) -> Self {
        Term::Node(Rc::new(Node { op, params }))
    }

    pub fn atom(name: &str) -> Self {
        cache::atom(name)
    }

    pub fn string(value: &str) -> Self {
        cache::datatype(LIST, value.chars().map(Term::Char).collect())
    }

    pub fn datatype(name: &str, args: Sequence) -> Self {
        cache::datatype(name, args)
    }

    pub fn tuple(elements: impl IntoIterator<Item = Term>) -> Self {
        cache::datatype(TUPLE, Sequence::new(elements))
    }

    pub fn list(elements: impl IntoIterator<Item = Term>) -> Self {
        cache::datatype(LIST, Sequence::new(elements))
    }

    pub fn vector(elements: impl IntoIterator<Item = Term>) -> Self {
        cache::datatype(VECTOR, Sequence::new(elements))
    }

    pub fn signal() -> Self {
        cache::datatype(SIGNAL, Sequence::empty())
    }

    pub fn map(entries: BTreeMap<Term, Sequence>) -> Self {
        Term::Map(Rc::new(entries))
    }

    pub fn set(elements: BTreeSet<Term>) -> Self {
        Term::Set(Rc::new(elements))
    }

    pub fn ty(ty: Type) -> Self {
        Term::Type(Rc::new(ty))
    }

    /// Whether no further rewriting applies.
    pub fn is_value(&self) -> bool {
        match self {
            Term::Node(_) => false,
            Term::Seq(items) | Term::Spread(items) => items.iter().all(Term::is_value),
            _ => true,
        }
    }

    pub fn is_reducible(&self) -> bool {
        !self.is_value()
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Term::Seq(_) | Term::Spread(_))
    }

    /// View this term as a sequence, wrapping a single term.
    pub fn into_sequence(self) -> Sequence {
        match self {
            Term::Seq(items) | Term::Spread(items) => items,
            other => Sequence::new([other]),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Term::Type(ty) => Some(ty.as_ref()),
            _ => None,
        }
    }

    /// Arguments of a datatype value built by constructor `name`.
    pub fn datatype_args(&self, name: &str) -> Option<&Sequence> {
        match self {
            Term::Data(data) if &*data.name == name => Some(&data.args),
            _ => None,
        }
    }

    /// The text of a string value (a list of characters).
    pub fn as_string(&self) -> Option<String> {
        self.datatype_args(LIST)?
            .iter()
            .map(|c| match c {
                Term::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Name used when reporting this term as stuck.
    pub fn operator_name(&self) -> &str {
        match self {
            Term::Node(node) => node.op.name(),
            Term::Seq(_) | Term::Spread(_) => "sequence",
            _ => "value",
        }
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Int(value)
    }
}

impl From<char> for Term {
    fn from(value: char) -> Self {
        Term::Char(value)
    }
}

impl From<Type> for Term {
    fn from(value: Type) -> Self {
        Term::ty(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence_unwraps_singletons() {
        assert_eq!(Term::from_sequence(Sequence::new([Term::Int(3)])), Term::Int(3));
        assert_eq!(Term::from_sequence(Sequence::empty()), Term::empty());
    }

    #[test]
    fn test_sequence_of_values_is_terminal() {
        let values = Term::Seq(Sequence::new([Term::Int(1), Term::Bool(false)]));
        assert!(values.is_value());

        let pending = Term::Seq(Sequence::new([
            Term::Int(1),
            Term::node(Op::Given, vec![]),
        ]));
        assert!(pending.is_reducible());
    }

    #[test]
    fn test_string_round_trip() {
        let text = Term::string("héllo");
        assert_eq!(text.as_string().as_deref(), Some("héllo"));
        assert_eq!(
            Term::list("ab".chars().map(Term::Char)),
            Term::string("ab")
        );
        assert_eq!(Term::tuple([Term::Int(1)]).as_string(), None);
    }
}
