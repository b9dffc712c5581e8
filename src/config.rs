//! Interpreter configuration.

use crate::error::RuntimeError;

/// Host-imposed limits and knobs for one interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum number of micro-steps per execution, `None` for unbounded.
    pub step_limit: Option<u64>,
    /// Seed of the stream used by non-deterministic operators.
    pub choice_seed: u64,
    /// Stop a run-to-fixpoint loop that makes no progress.
    pub stall_detection: bool,
}

impl InterpreterConfig {
    pub const DEFAULT_STEP_LIMIT: u64 = 100_000;

    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn with_choice_seed(mut self, seed: u64) -> Self {
        self.choice_seed = seed;
        self
    }

    pub fn with_stall_detection(mut self, enabled: bool) -> Self {
        self.stall_detection = enabled;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.step_limit == Some(0) {
            return Err(RuntimeError::InvalidConfig(
                "step_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step_limit: Some(Self::DEFAULT_STEP_LIMIT),
            choice_seed: 0x5EED,
            stall_detection: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(InterpreterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_step_limit_is_rejected() {
        let config = InterpreterConfig::default().with_step_limit(Some(0));
        assert!(matches!(
            config.validate(),
            Err(RuntimeError::InvalidConfig(_))
        ));
    }
}
