/// Structural setup errors.
///
/// Every variant is a programmer or configuration mistake: it surfaces while
/// a variable, rule base, or pipeline stage is being assembled and aborts
/// that assembly. None of these occur during evaluation of a validly built
/// pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown source '{name}' referenced by a rule or stage")]
    UnknownSource { name: String },

    #[error("rule base needs at least one source")]
    NoSources,

    #[error("unknown label '{label}' on '{variable}'")]
    UnknownLabel { variable: String, label: String },

    #[error("duplicate label '{label}' in partition of '{variable}'")]
    DuplicateLabel { variable: String, label: String },

    #[error("variable '{name}' has an empty partition")]
    EmptyPartition { name: String },

    #[error("duplicate rule for conditions ({conditions})")]
    DuplicateRule { conditions: String },

    #[error("rule conditions name '{variable}' more than once")]
    DuplicateCondition { variable: String },

    #[error("rule names {actual} conditions, engine has {expected} sources")]
    ConditionArityMismatch { expected: usize, actual: usize },

    #[error("duplicate slot '{name}' in pipeline")]
    DuplicateSlot { name: String },

    #[error("variable '{name}' read before any value was assigned")]
    UnsetVariable { name: String },

    #[error("invalid universe: {reason}")]
    InvalidUniverse { reason: String },

    #[error("invalid trapezoid breakpoints: {reason}")]
    InvalidBreakpoints { reason: String },

    #[error("gamma must be positive, got {gamma}")]
    InvalidGamma { gamma: f64 },

    #[error("regression values: expected {expected} entries, got {actual}")]
    RegressionArityMismatch { expected: usize, actual: usize },

    #[error("degrees: expected {expected} entries, got {actual}")]
    DegreeArityMismatch { expected: usize, actual: usize },

    #[error("failed to parse definitions: {reason}")]
    Parse { reason: String },
}
