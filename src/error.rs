//! # Interpreter Errors
//!
//! Two kinds of failure exist while rewriting a term:
//!
//! - [`Stuck`]: no rule applies. The engine catches it while speculatively
//!   reducing an eager parameter, restores the entity store and moves on to
//!   the next parameter. It only reaches the caller once every option is gone.
//! - [`ConstructionError`]: the catalog or the initial term is malformed
//!   (unknown operator, wrong arity, bad type argument). These are fatal and
//!   never retried.
//!
//! [`RuntimeError`] is what `step`, `run` and `execute` return.

use std::fmt;

use thiserror::Error;

/// No rule applies to a term.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operator} is stuck{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
pub struct Stuck {
    /// Name of the operator whose rules could not fire
    pub operator: String,
    /// Optional human-readable reason
    pub reason: Option<String>,
}

impl Stuck {
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            reason: None,
        }
    }

    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Expected argument count of an operator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Failure to build a term from an operator name and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    #[error("`{operator}` expects {expected} argument(s), found {found}")]
    Arity {
        operator: String,
        expected: Arity,
        found: usize,
    },

    #[error("unknown type constructor `{0}`")]
    UnknownType(String),

    #[error("`{operator}` expects type arguments, found `{found}`")]
    InvalidTypeArgument { operator: String, found: String },

    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),
}

/// Failure reported by the sequence container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("cannot slice [{start}, {len} - {end_offset}) from a sequence of length {len}")]
    InvalidSlice {
        start: usize,
        end_offset: usize,
        len: usize,
    },
}

/// Everything the reduction engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Stuck(#[from] Stuck),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    #[error("invalid interpreter configuration: {0}")]
    InvalidConfig(String),
}

impl RuntimeError {
    /// Whether the engine may recover from this error by rolling back.
    pub fn is_stuck(&self) -> bool {
        matches!(self, RuntimeError::Stuck(_))
    }
}

pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stuck_display() {
        assert_eq!(Stuck::new("given").to_string(), "given is stuck");
        assert_eq!(
            Stuck::new("read").because("standard-in is exhausted").to_string(),
            "read is stuck: standard-in is exhausted"
        );
    }

    #[test]
    fn test_arity_display() {
        let err = ConstructionError::Arity {
            operator: "is-equal".to_string(),
            expected: Arity::Exactly(2),
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "`is-equal` expects exactly 2 argument(s), found 1"
        );
    }

    #[test]
    fn test_only_stuck_is_recoverable() {
        assert!(RuntimeError::from(Stuck::new("fail")).is_stuck());
        assert!(!RuntimeError::StepLimitExceeded { limit: 3 }.is_stuck());
    }
}
