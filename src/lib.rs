//! # Funcon - A Small-Step Interpreter for Component-Based Semantics
//!
//! Funcon runs programs written as terms over *funcons*, the fundamental
//! constructs of Component-Based Semantics (CBS). A program is a single
//! initial term; the interpreter rewrites it one micro-step at a time until
//! it is a value or no rule applies.
//!
//! ## Architecture Overview
//!
//! 1. **Lexer** (`lexer`) - Tokenizes term syntax using the `lachs` library
//! 2. **Parser** (`parser`) - Builds a parse tree with combinator-based recursive descent
//! 3. **Builder** (`builder`) - Resolves names through the node factory into an initial term
//! 4. **Interpreter** (`interpreter`) - Reduces the term with small-step rules over an entity store
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Text (String)
//!     ↓
//! [Lexer] → Token Stream
//!     ↓
//! [Parser] → Parse Tree (ast::ParseTree)
//!     ↓
//! [Builder + Factory] → Initial Term (term::Term)
//!     ↓
//! [Interpreter] → Execution (value or stuck term, printed output, store)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Eager and Lazy Parameters
//! Every funcon declares each parameter as eager or lazy, and possibly as a
//! sequence. Eager parameters are reduced to values before the funcon's own
//! rule fires, in order, each attempt guarded by an entity snapshot so a
//! parameter that gets stuck leaves no trace. Lazy parameters reach the rule
//! unevaluated.
//!
//! ### Sequences Splice
//! There are no nested sequences. A rule that produces several values
//! returns a spread that is spliced into whatever holds it. A spread that
//! lands in a fixed parameter position re-binds the parameters of its
//! parent; a plain sequence there stays a single argument.
//!
//! ### Entities
//! Side effects go through named entities: contextual ones such as
//! `given-value`, mutable ones such as `store`, and control signals such as
//! `yielded`. Entities are snapshotted and restored whole.
//!
//! ## Module Structure
//!
//! - [`ast`] - Parse trees for the term syntax
//! - [`builder`] - Parse tree to initial term
//! - [`catalog`] - Funcon operators, their parameters and names
//! - [`config`] - Interpreter configuration
//! - [`error`] - Stuck, construction and runtime errors
//! - [`factory`] - Node construction and parameter binding
//! - [`fmt`] - Printing terms in CBS notation
//! - [`interpreter`] - The reduction engine and its entity store
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Parsing using combinator-based grammar
//! - [`rng`] - Deterministic choice stream
//! - [`term`] - Terms and sequences
//! - [`types`] - Value types and membership
//!
//! ## Example Program
//!
//! ```text
//! give(3, integer-add(given, 4))
//! ```
//!
//! `give` reduces `3`, binds it as the given value and evaluates its body,
//! where `given` reads it back. The result is `7`.
//!
//! ## Getting Started
//!
//! 1. Read a term with [`builder::read_term()`]
//! 2. Create an [`interpreter::Interpreter`] from a [`config::InterpreterConfig`]
//! 3. Run with [`interpreter::Interpreter::execute()`]

pub mod ast;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod factory;
pub mod fmt;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod rng;
pub mod term;
pub mod types;
