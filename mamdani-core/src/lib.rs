//! # mamdani-core
//!
//! Foundation crate for the Mamdani fuzzy inference workspace.
//! Defines labels, graded values, the error taxonomy, config specs,
//! and constants. The engine crate builds on top of this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod graded;
pub mod label;

// Re-export the most commonly used types at the crate root.
pub use errors::{ConfigError, FuzzyError, FuzzyResult};
pub use graded::GradedValue;
pub use label::Label;
