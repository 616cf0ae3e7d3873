use mamdani_core::{FuzzyError, Label};

/// Coach-level errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoachError {
    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),

    /// A sentinel label fired during plan evaluation: the requested goal
    /// combination is unsafe and no plan can be produced.
    #[error("unsafe goal combination: stage '{stage}' raised '{label}'")]
    UnsafeGoal { stage: String, label: Label },

    #[error("invalid profile: {reason}")]
    InvalidProfile { reason: String },
}

pub type CoachResult<T> = Result<T, CoachError>;
