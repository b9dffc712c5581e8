//! # Value Classification Lattice
//!
//! A flat [`Type`] enum covering the named value regions (booleans,
//! integers, maps, ...) together with union, intersection and complement,
//! and a single recursive predicate [`belongs_to`] deciding membership.
//!
//! `belongs_to` is a pure structural check without allocation.

pub mod lattice;
pub mod ty;

pub use lattice::belongs_to;
pub use ty::{Type, TypeCtor};
