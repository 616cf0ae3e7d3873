//! # mamdani-coach
//!
//! Domain layer over the fuzzy inference engine: evaluates an athlete
//! profile through chained inference stages (biological condition →
//! nutrition → per-body-part training intensity) and produces a calorie
//! target, macronutrient split, and a weekly training schedule.

pub mod catalog;
pub mod error;
pub mod nutrition;
pub mod objectives;
pub mod plan;
pub mod profile;

pub use error::{CoachError, CoachResult};
pub use plan::{build_plan, Effort, Session, TrainingPlan};
pub use profile::{ActivityLevel, AthleteProfile, BodyPart, Sex};
