//! Error taxonomy for the inference engine.
//!
//! Three of the four kinds are fatal to setup or assignment and never occur
//! once a pipeline is validly built. [`FuzzyError::DegenerateValue`] is the
//! exception: it signals "no rule fired at all" during normal operation and
//! callers are expected to handle it with an explicit fallback policy.

mod config_error;

pub use config_error::ConfigError;

/// Umbrella error for the whole workspace.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// Structurally invalid setup. Fatal to the stage being constructed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rule count does not match the Cartesian product of the input
    /// partition sizes. Fatal to engine construction.
    #[error("incomplete rule base: expected {expected} rules, got {actual}")]
    IncompleteRuleBase { expected: usize, actual: usize },

    /// A direct graded assignment whose label set does not match the target
    /// partition. Fatal to that assignment.
    #[error("label mismatch on '{variable}': '{offending}' is not shared by both label sets")]
    LabelMismatch { variable: String, offending: String },

    /// Normalization or defuzzification attempted on an all-zero value.
    /// Recoverable: callers apply a priority-ordered default instead of
    /// treating this as a bug.
    #[error("degenerate graded value: every degree is zero")]
    DegenerateValue,
}

impl FuzzyError {
    /// True for the one error kind expected during normal operation.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, FuzzyError::DegenerateValue)
    }
}

/// Result alias used across the workspace.
pub type FuzzyResult<T> = Result<T, FuzzyError>;
