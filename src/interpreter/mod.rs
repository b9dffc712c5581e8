//! # Reduction Engine
//!
//! Small-step rewriting of [`Term`]s with an [`EntityStore`] threaded
//! through every step.
//!
//! - [`Interpreter::step`] performs one micro-step.
//! - [`Interpreter::run`] repeats micro-steps until the term is a value.
//! - [`Interpreter::execute`] runs a whole program: it seeds
//!   `standard-in`, drives to a value and collects `standard-out` and the
//!   store into an [`Execution`].
//!
//! The step algorithm lives in `eval`; the rules of individual operators
//! live in `rules`.

mod entities;
mod eval;
mod rules;

pub use entities::{EntityStore, Snapshot};

use tracing::{debug, info};

use crate::catalog::{STANDARD_IN, STANDARD_OUT, STORE};
use crate::config::InterpreterConfig;
use crate::error::{Result, RuntimeError, Stuck};
use crate::rng::ChoiceRng;
use crate::term::{Sequence, Term};

/// How a program ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The program reduced to this value
    Value(Term),
    /// No rule applied to `term`
    Stuck { term: Term, stuck: Stuck },
}

/// Result boundary of one program execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub outcome: Outcome,
    /// Everything printed, in order
    pub standard_out: Vec<Term>,
    /// Final contents of the store entity
    pub store: Term,
}

impl Execution {
    pub fn value(&self) -> Option<&Term> {
        match &self.outcome {
            Outcome::Value(value) => Some(value),
            Outcome::Stuck { .. } => None,
        }
    }
}

/// One independent execution context: entities, configuration and the
/// choice stream. Interpreters share nothing with each other.
pub struct Interpreter {
    entities: EntityStore,
    config: InterpreterConfig,
    rng: ChoiceRng,
    steps: u64,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entities: EntityStore::new(),
            rng: ChoiceRng::new(config.choice_seed),
            config,
            steps: 0,
        })
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    /// Micro-steps performed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run `term` as a program reading `standard_in`.
    ///
    /// A stuck program is reported through [`Outcome::Stuck`] together with
    /// the last term reached. Every other error aborts the execution.
    pub fn execute(
        &mut self,
        term: Term,
        standard_in: impl IntoIterator<Item = Term>,
    ) -> Result<Execution> {
        let inputs = Sequence::new(standard_in);
        if !inputs.is_empty() {
            self.entities
                .append_mutable(STANDARD_IN, Term::Seq(inputs));
        }

        let mut current = term;
        let outcome = loop {
            if current.is_value() {
                break Outcome::Value(normalize(current));
            }
            match self.advance(&current) {
                Ok(next) => current = next,
                Err(RuntimeError::Stuck(stuck)) => {
                    debug!(%stuck, "execution stuck");
                    break Outcome::Stuck {
                        term: current,
                        stuck,
                    };
                }
                Err(other) => return Err(other),
            }
        };
        info!(steps = self.steps, "execution finished");

        Ok(Execution {
            outcome,
            standard_out: self
                .entities
                .output(STANDARD_OUT)
                .iter()
                .cloned()
                .collect(),
            store: self.entities.get(STORE),
        })
    }
}

/// A finished spread is an ordinary sequence; a one-element sequence is its
/// element.
fn normalize(term: Term) -> Term {
    match term {
        Term::Seq(items) | Term::Spread(items) => Term::from_sequence(items),
        other => other,
    }
}
