//! Maintenance calories and macronutrient split.

use serde::{Deserialize, Serialize};

use crate::profile::{AthleteProfile, Sex};

/// Daily maintenance calories via the Harris–Benedict equation, scaled by
/// the activity multiplier.
pub fn maintenance_calories(profile: &AthleteProfile) -> f64 {
    let w = profile.weight_kg;
    let h = profile.height_cm;
    let a = profile.age as f64;
    let bmr = match profile.sex {
        Sex::Male => 66.5 + 13.75 * w + 5.003 * h - 6.75 * a,
        Sex::Female => 655.1 + 9.563 * w + 1.850 * h - 4.676 * a,
    };
    bmr * profile.activity.multiplier()
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub carbs_g: u32,
    pub protein_g: u32,
    pub fat_g: u32,
}

/// Split a calorie target 45% carbs / 25% protein / 30% fat, at
/// 4 kcal/g for carbs and protein and 9 kcal/g for fat.
pub fn macro_split(calories: f64) -> MacroSplit {
    MacroSplit {
        carbs_g: (calories * 0.45 / 4.0) as u32,
        protein_g: (calories * 0.25 / 4.0) as u32,
        fat_g: (calories * 0.30 / 9.0) as u32,
    }
}
