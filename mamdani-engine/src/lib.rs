//! # mamdani-engine
//!
//! Mamdani-style fuzzy inference over discretized universes.
//!
//! The building blocks compose into chains of inference stages:
//! a crisp input is fuzzified by a [`FuzzyVariable`] into a
//! [`mamdani_core::GradedValue`], one or more graded values feed an
//! [`InferenceEngine`] through a validated [`RuleBase`], and the graded
//! conclusion is normalized, defuzzified, or wired into the next stage
//! by a [`Pipeline`].

pub mod engine;
pub mod membership;
pub mod pipeline;
pub mod rules;
pub mod variable;

pub use engine::{InferenceEngine, TNorm};
pub use membership::{MembershipFunction, Universe};
pub use pipeline::{Pipeline, RunOutcome, Stage};
pub use rules::{RuleBase, SourceSchema};
pub use variable::FuzzyVariable;
