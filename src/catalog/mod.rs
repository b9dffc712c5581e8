//! # Operator Catalog
//!
//! The static, read-only description of every operator the interpreter
//! knows: its canonical name, the shape and evaluation policy of its
//! parameters, and the names it may also be written under.
//!
//! Three kinds of names live in the catalog:
//!
//! - **Funcons** ([`Op`]): operators with rewrite rules, built into
//!   [`Term::Node`](crate::term::Term::Node) and reduced by the engine.
//! - **Value constructors** ([`ValueCtor`]): `true`, `false`, `null-value`,
//!   `signal`. They build a value directly.
//! - **Type constructors** ([`TypeCtor`]): `booleans`, `maps(K,V)`, ... They
//!   build a [`Type`](crate::types::Type) value directly.
//!
//! The catalog also declares the entities reduction may touch and their
//! write discipline ([`EntityKind`]).
//!
//! Lookups go through a name table built once per process.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::term::Term;
use crate::types::TypeCtor;

/// Evaluation policy of one declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// Reduced to a value before the operator's rules fire
    Eager,
    /// Passed to the rules unevaluated
    Lazy,
    /// Absorbs a run of arguments; each is reduced to a value
    EagerSeq,
    /// Absorbs a run of arguments left unevaluated
    LazySeq,
}

impl Param {
    pub fn is_eager(self) -> bool {
        matches!(self, Param::Eager | Param::EagerSeq)
    }

    pub fn is_sequence(self) -> bool {
        matches!(self, Param::EagerSeq | Param::LazySeq)
    }
}

macro_rules! operators {
    ($($op:ident => $name:literal [$($param:ident),*];)*) => {
        /// A funcon with its own rewrite rules.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Op {
            $($op,)*
        }

        impl Op {
            pub const ALL: &'static [Op] = &[$(Op::$op,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Op::$op => $name,)*
                }
            }

            /// Declared parameters, in order.
            pub fn params(self) -> &'static [Param] {
                match self {
                    $(Op::$op => &[$(Param::$param),*],)*
                }
            }
        }
    };
}

operators! {
    // flow
    LeftToRight => "left-to-right" [LazySeq];
    RightToLeft => "right-to-left" [LazySeq];
    Sequential => "sequential" [LazySeq, Lazy];
    Effect => "effect" [EagerSeq];
    Choice => "choice" [LazySeq];
    IfTrueElse => "if-true-else" [Eager, Lazy, Lazy];
    Stuck => "stuck" [];
    Fail => "fail" [];

    // control and entities
    Atomic => "atomic" [Lazy];
    Yield => "yield" [];
    YieldOnValue => "yield-on-value" [Eager];
    Give => "give" [Eager, Lazy];
    Given => "given" [];
    Print => "print" [EagerSeq];
    Read => "read" [];
    UseAtomNotIn => "use-atom-not-in" [Eager];
    AllocateVariable => "allocate-variable" [Eager];
    Assign => "assign" [Eager, Eager];
    Assigned => "assigned" [Eager];

    // booleans and comparison
    Not => "not" [Eager];
    And => "and" [EagerSeq];
    Or => "or" [EagerSeq];
    Implies => "implies" [Eager, Eager];
    ExclusiveOr => "exclusive-or" [Eager, Eager];
    IsEqual => "is-equal" [Eager, Eager];
    IsInType => "is-in-type" [Eager, Eager];

    // integers
    IntegerAdd => "integer-add" [EagerSeq];
    IntegerMultiply => "integer-multiply" [EagerSeq];
    IntegerSubtract => "integer-subtract" [Eager, Eager];
    IntegerDivide => "integer-divide" [Eager, Eager];
    IntegerModulo => "integer-modulo" [Eager, Eager];
    IntegerPower => "integer-power" [Eager, Eager];
    IntegerAbsoluteValue => "integer-absolute-value" [Eager];
    IntegerNegate => "integer-negate" [Eager];
    IntegerIsLess => "integer-is-less" [Eager, Eager];
    IntegerIsGreater => "integer-is-greater" [Eager, Eager];
    IntegerIsLessOrEqual => "integer-is-less-or-equal" [Eager, Eager];
    IntegerIsGreaterOrEqual => "integer-is-greater-or-equal" [Eager, Eager];
    NaturalSuccessor => "natural-successor" [Eager];
    NaturalPredecessor => "natural-predecessor" [Eager];

    // sequences, tuples, lists, vectors, datatypes
    Length => "length" [EagerSeq];
    Index => "index" [Eager, EagerSeq];
    Reverse => "reverse" [EagerSeq];
    Tuple => "tuple" [EagerSeq];
    TupleElements => "tuple-elements" [Eager];
    List => "list" [EagerSeq];
    ListElements => "list-elements" [Eager];
    ListAppend => "list-append" [EagerSeq];
    ListHead => "list-head" [Eager];
    ListTail => "list-tail" [Eager];
    Vector => "vector" [EagerSeq];
    VectorElements => "vector-elements" [Eager];
    DatatypeValue => "datatype-value" [Eager, EagerSeq];

    // maps
    Map => "map" [EagerSeq];
    MapEmpty => "map-empty" [];
    MapLookup => "map-lookup" [Eager, Eager];
    MapOverride => "map-override" [EagerSeq];
    MapUnite => "map-unite" [EagerSeq];
    MapDomain => "map-domain" [Eager];
    MapElements => "map-elements" [Eager];
    MapDelete => "map-delete" [Eager, Eager];

    // sets
    Set => "set" [EagerSeq];
    SetEmpty => "set-empty" [];
    IsInSet => "is-in-set" [Eager, Eager];
    SetElements => "set-elements" [Eager];
    SetUnite => "set-unite" [EagerSeq];
    SetDifference => "set-difference" [Eager, Eager];
    SetSize => "set-size" [Eager];
    SetInsert => "set-insert" [Eager, Eager];
    SomeElement => "some-element" [Eager];
    ElementNotIn => "element-not-in" [Eager, Eager];
}

/// A name that builds a value without any reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCtor {
    True,
    False,
    NullValue,
    Signal,
}

impl ValueCtor {
    pub const ALL: &'static [ValueCtor] = &[
        ValueCtor::True,
        ValueCtor::False,
        ValueCtor::NullValue,
        ValueCtor::Signal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValueCtor::True => "true",
            ValueCtor::False => "false",
            ValueCtor::NullValue => "null-value",
            ValueCtor::Signal => "signal",
        }
    }

    pub fn build(self) -> Term {
        match self {
            ValueCtor::True => Term::Bool(true),
            ValueCtor::False => Term::Bool(false),
            ValueCtor::NullValue => Term::Null,
            ValueCtor::Signal => Term::signal(),
        }
    }
}

/// What a catalog name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Funcon(Op),
    Value(ValueCtor),
    Type(TypeCtor),
}

/// Alternative spellings and their canonical names.
pub const ALIASES: &[(&str, &str)] = &[
    ("null", "null-value"),
    ("int-add", "integer-add"),
    ("int-sub", "integer-subtract"),
    ("int-mul", "integer-multiply"),
    ("int-div", "integer-divide"),
    ("int-mod", "integer-modulo"),
    ("int-pow", "integer-power"),
    ("int-abs", "integer-absolute-value"),
    ("int-neg", "integer-negate"),
    ("is-less", "integer-is-less"),
    ("is-greater", "integer-is-greater"),
    ("is-less-or-equal", "integer-is-less-or-equal"),
    ("is-greater-or-equal", "integer-is-greater-or-equal"),
    ("nat-succ", "natural-successor"),
    ("nat-pred", "natural-predecessor"),
    ("l-to-r", "left-to-right"),
    ("r-to-l", "right-to-left"),
    ("is-eq", "is-equal"),
    ("dom", "map-domain"),
    ("union", "union-type"),
    ("intersection", "intersection-type"),
    ("complement", "complement-type"),
];

fn registry() -> &'static HashMap<&'static str, Entry> {
    static REGISTRY: OnceLock<HashMap<&'static str, Entry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let funcons = Op::ALL.iter().map(|op| (op.name(), Entry::Funcon(*op)));
        let values = ValueCtor::ALL
            .iter()
            .map(|ctor| (ctor.name(), Entry::Value(*ctor)));
        let types = TypeCtor::ALL
            .iter()
            .map(|ctor| (ctor.name(), Entry::Type(*ctor)));
        funcons.chain(values).chain(types).collect()
    })
}

/// Map an alias to its canonical name; canonical names map to themselves.
pub fn canonical_name(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Find what `name` (or the name it aliases) refers to.
pub fn lookup(name: &str) -> Option<Entry> {
    registry().get(canonical_name(name)).copied()
}

/// Write discipline of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Supplied by an enclosing term for the extent of a sub-computation
    Contextual,
    /// Persists across steps
    Mutable,
    /// Signalled by a step, read once and cleared by its consumer
    Control,
}

pub const GIVEN_VALUE: &str = "given-value";
pub const STORE: &str = "store";
pub const USED_ATOM_SET: &str = "used-atom-set";
pub const STANDARD_IN: &str = "standard-in";
pub const STANDARD_OUT: &str = "standard-out";
pub const YIELDED: &str = "yielded";

pub const ENTITIES: &[(&str, EntityKind)] = &[
    (GIVEN_VALUE, EntityKind::Contextual),
    (STORE, EntityKind::Mutable),
    (USED_ATOM_SET, EntityKind::Mutable),
    (STANDARD_IN, EntityKind::Mutable),
    (STANDARD_OUT, EntityKind::Mutable),
    (YIELDED, EntityKind::Control),
];

pub fn entity_kind(name: &str) -> Option<EntityKind> {
    ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, kind)| *kind)
}
