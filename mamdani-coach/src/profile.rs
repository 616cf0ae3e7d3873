//! Athlete profile: the crisp inputs of a coaching run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoachError, CoachResult};

/// Biological sex, as used by the Harris–Benedict formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Weekly activity level outside the gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    High,
}

impl ActivityLevel {
    /// Maintenance multiplier applied to the basal metabolic rate.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
        }
    }
}

/// The four trained body parts, each with its own inference branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyPart {
    Arms,
    Legs,
    Back,
    Torso,
}

impl BodyPart {
    pub const ALL: [BodyPart; 4] = [BodyPart::Arms, BodyPart::Legs, BodyPart::Back, BodyPart::Torso];
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyPart::Arms => "arms",
            BodyPart::Legs => "legs",
            BodyPart::Back => "back",
            BodyPart::Torso => "torso",
        };
        f.write_str(name)
    }
}

/// Crisp per-body-part inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartInputs {
    /// Desired relative muscle change, nominally in [-0.3, 1.0].
    pub muscle_goal: f64,
    /// Genetic response grade, 0 (poor) to 4 (excellent).
    pub genetics: u8,
    /// Injury severity, 0.0 (healthy) to 1.0 (severely injured).
    pub injury: f64,
}

/// Everything a coaching run needs to know about the athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sex: Sex,
    pub activity: ActivityLevel,
    /// Measured body-fat ratio, nominally in [0.07, 0.25].
    pub body_fat: f64,
    /// Desired body-fat ratio, same range.
    pub target_body_fat: f64,
    /// Doping responsiveness 0–3, `None` when the athlete is clean.
    pub doping_response: Option<u8>,
    pub parts: BTreeMap<BodyPart, PartInputs>,
}

impl AthleteProfile {
    /// Body mass index from height and weight.
    pub fn bmi(&self) -> f64 {
        self.weight_kg / (self.height_cm / 100.0).powi(2)
    }

    /// Check ranges that the fuzzy variables cannot absorb by clamping.
    pub fn validate(&self) -> CoachResult<()> {
        if self.height_cm <= 0.0 || self.weight_kg <= 0.0 {
            return Err(CoachError::InvalidProfile {
                reason: "height and weight must be positive".to_string(),
            });
        }
        if let Some(response) = self.doping_response {
            if response > 3 {
                return Err(CoachError::InvalidProfile {
                    reason: format!("doping responsiveness {response} out of range 0..=3"),
                });
            }
        }
        for part in BodyPart::ALL {
            let inputs = self.parts.get(&part).ok_or_else(|| CoachError::InvalidProfile {
                reason: format!("missing inputs for {part}"),
            })?;
            if inputs.genetics > 4 {
                return Err(CoachError::InvalidProfile {
                    reason: format!("{part}: genetics grade {} out of range 0..=4", inputs.genetics),
                });
            }
            if !(0.0..=1.0).contains(&inputs.injury) {
                return Err(CoachError::InvalidProfile {
                    reason: format!("{part}: injury severity {} out of range 0..=1", inputs.injury),
                });
            }
        }
        Ok(())
    }
}
