//! Variable partitions and rule tables of the coaching system.
//!
//! Breakpoints are in Kaufmann notation. Rule tables are written as
//! row-major grids so each table reads like the matrix it is: one row per
//! label of the first source, one column per label of the second.

use mamdani_core::config::{RuleSpec, TermSpec, UniverseSpec, VariableSpec};
use mamdani_core::errors::ConfigError;
use mamdani_core::{FuzzyResult, GradedValue, Label};
use mamdani_engine::FuzzyVariable;

// ── Slot names ──────────────────────────────────────────────────────────

pub const BODY_FAT: &str = "body-fat";
pub const BMI: &str = "bmi";
pub const GOAL: &str = "goal";
pub const TARGET_FAT: &str = "target-fat";
pub const GENETICS: &str = "genetics";
pub const DOPING: &str = "doping";
pub const INJURY: &str = "injury";
pub const INTAKE: &str = "intake";
pub const CONDITION: &str = "condition";
pub const NUTRITION_PROVISIONAL: &str = "nutrition-provisional";
pub const INTAKE_ADJUSTMENT: &str = "intake-adjustment";
pub const NEEDED_MID: &str = "needed-mid";
pub const NEEDED: &str = "needed";
pub const POSSIBLE: &str = "possible";

/// Sentinel conclusion: the requested combination is unsafe.
pub const DANGER: &str = "danger";

// ── Variables ───────────────────────────────────────────────────────────

fn body_fat_terms() -> Vec<TermSpec> {
    vec![
        TermSpec::new("lean", [0.06, 0.06, 0.13, 0.14]),
        TermSpec::new("normal", [0.13, 0.14, 0.17, 0.18]),
        TermSpec::new("high", [0.17, 0.18, 0.24, 0.25]),
        TermSpec::new("very-high", [0.24, 0.25, 0.26, 0.26]),
    ]
}

/// Measured body-fat ratio. `name` differs between the measured and the
/// target variable; the partition is shared.
pub fn body_fat_variable(name: &str) -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        name,
        UniverseSpec::new(0.07, 0.25, 1000),
        body_fat_terms(),
    ))
}

pub fn bmi_variable() -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        BMI,
        UniverseSpec::new(10.0, 50.0, 1000),
        vec![
            TermSpec::new("underweight", [0.0, 0.0, 18.5, 20.0]),
            TermSpec::new("ideal", [18.5, 20.0, 25.0, 26.0]),
            TermSpec::new("overweight", [25.0, 26.0, 30.0, 31.0]),
            TermSpec::new("obese-1", [30.0, 31.0, 35.0, 36.0]),
            TermSpec::new("obese-2", [35.0, 36.0, 40.0, 41.0]),
            TermSpec::new("obese-3", [40.0, 41.0, 50.0, 50.0]),
        ],
    ))
}

pub fn muscle_goal_variable() -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        GOAL,
        UniverseSpec::new(-0.3, 1.0, 1000),
        vec![
            TermSpec::new("loss", [-0.4, -0.4, -0.05, 0.0]),
            TermSpec::new("maintain", [-0.05, 0.0, 0.0, 0.05]),
            TermSpec::new("moderate-gain", [0.0, 0.05, 0.4, 0.6]),
            TermSpec::new("large-gain", [0.4, 0.6, 1.1, 1.1]),
        ],
    ))
}

/// Genetic response grade: singleton spikes on the integer grid.
pub fn genetics_variable() -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        GENETICS,
        UniverseSpec::new(0.0, 4.0, 5),
        vec![
            TermSpec::new("poor", [0.0, 0.0, 0.0, 0.0]),
            TermSpec::new("weak-point", [1.0, 1.0, 1.0, 1.0]),
            TermSpec::new("average", [2.0, 2.0, 2.0, 2.0]),
            TermSpec::new("strong-point", [3.0, 3.0, 3.0, 3.0]),
            TermSpec::new("excellent", [4.0, 4.0, 4.0, 4.0]),
        ],
    ))
}

/// Doping responsiveness: singleton spikes on the integer grid.
pub fn doping_variable() -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        DOPING,
        UniverseSpec::new(0.0, 3.0, 4),
        vec![
            TermSpec::new("none", [0.0, 0.0, 0.0, 0.0]),
            TermSpec::new("weak", [1.0, 1.0, 1.0, 1.0]),
            TermSpec::new("responsive", [2.0, 2.0, 2.0, 2.0]),
            TermSpec::new("very-responsive", [3.0, 3.0, 3.0, 3.0]),
        ],
    ))
}

pub fn injury_variable() -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        INJURY,
        UniverseSpec::new(0.0, 1.0, 1000),
        vec![
            TermSpec::new("none", [0.0, 0.0, 0.0, 0.2]),
            TermSpec::new("minor", [0.0, 0.2, 0.3, 0.45]),
            TermSpec::new("moderate", [0.3, 0.45, 0.6, 0.7]),
            TermSpec::new("severe", [0.6, 0.7, 1.0, 1.0]),
        ],
    ))
}

pub fn intake_variable() -> FuzzyResult<FuzzyVariable> {
    FuzzyVariable::from_spec(&VariableSpec::new(
        INTAKE,
        UniverseSpec::new(1000.0, 4500.0, 10000),
        vec![
            TermSpec::new("insufficient", [1000.0, 1000.0, 1500.0, 2000.0]),
            TermSpec::new("low", [1500.0, 2000.0, 2500.0, 3000.0]),
            TermSpec::new("adequate", [2500.0, 3000.0, 3500.0, 4000.0]),
            TermSpec::new("abundant", [3500.0, 4000.0, 4500.0, 4500.0]),
        ],
    ))
}

// ── Rule tables ─────────────────────────────────────────────────────────

/// Row-major rule grid over two sources.
fn grid(
    row_source: &str,
    rows: &[&str],
    col_source: &str,
    cols: &[&str],
    conclusions: &[&str],
) -> Vec<RuleSpec> {
    debug_assert_eq!(conclusions.len(), rows.len() * cols.len());
    let mut rules = Vec::with_capacity(conclusions.len());
    for (r, row) in rows.iter().enumerate() {
        for (c, col) in cols.iter().enumerate() {
            rules.push(RuleSpec::new(
                &[(row_source, row), (col_source, col)],
                conclusions[r * cols.len() + c],
            ));
        }
    }
    rules
}

/// Biological condition (muscle-mass level) from body fat and BMI.
pub fn condition_rules() -> Vec<RuleSpec> {
    grid(
        BODY_FAT,
        &["lean", "normal", "high", "very-high"],
        BMI,
        &["underweight", "ideal", "overweight", "obese-1", "obese-2", "obese-3"],
        &[
            "normal", "normal", "high", "high", "extreme", "extreme",
            "low", "normal", "normal", "high", "normal", "extreme",
            "very-low", "low", "very-low", "low", "low", "low",
            "very-low", "very-low", "very-low", "very-low", "very-low", "very-low",
        ],
    )
}

/// Provisional nutrition verdict from condition and the dominant goal.
pub fn nutrition_provisional_rules() -> Vec<RuleSpec> {
    grid(
        CONDITION,
        &["very-low", "low", "normal", "high", "extreme"],
        GOAL,
        &["loss", "maintain", "moderate-gain", "large-gain"],
        &[
            DANGER, "hold", "large-surplus", "large-surplus",
            "hold", "hold", "large-surplus", "large-surplus",
            "deficit", "hold", "surplus", "surplus",
            "large-deficit", "hold", "surplus", "hold",
            "large-deficit", "hold", "hold", "hold",
        ],
    )
}

/// Final intake adjustment from the provisional verdict and the body-fat
/// target.
pub fn intake_adjustment_rules() -> Vec<RuleSpec> {
    grid(
        NUTRITION_PROVISIONAL,
        &[DANGER, "large-deficit", "deficit", "hold", "surplus", "large-surplus"],
        TARGET_FAT,
        &["lean", "normal", "high", "very-high"],
        &[
            DANGER, DANGER, DANGER, DANGER,
            "large-deficit", "large-deficit", "large-deficit", "deficit",
            "large-deficit", "deficit", "deficit", "hold",
            "deficit", "deficit", "hold", "surplus",
            "hold", "hold", "surplus", "large-surplus",
            "hold", "surplus", "large-surplus", "large-surplus",
        ],
    )
}

/// Intensity a part needs, from genetics and its goal.
pub fn needed_intensity_rules() -> Vec<RuleSpec> {
    grid(
        GENETICS,
        &["poor", "weak-point", "average", "strong-point", "excellent"],
        GOAL,
        &["loss", "maintain", "moderate-gain", "large-gain"],
        &[
            "none", "moderate", "intense", "very-intense",
            "none", "moderate", "intense", "very-intense",
            "none", "light", "moderate", "very-intense",
            "none", "very-light", "light", "intense",
            "none", "very-light", "light", "intense",
        ],
    )
}

/// Doping correction over the intermediate needed intensity.
pub fn doping_correction_rules() -> Vec<RuleSpec> {
    grid(
        NEEDED_MID,
        &["none", "very-light", "light", "moderate", "intense", "very-intense"],
        DOPING,
        &["none", "weak", "responsive", "very-responsive"],
        &[
            "none", "none", "none", "none",
            "very-light", "very-light", "none", "none",
            "light", "light", "very-light", "very-light",
            "moderate", "moderate", "light", "very-light",
            "intense", "intense", "moderate", "light",
            "very-intense", "very-intense", "intense", "intense",
        ],
    )
}

/// Intensity a part can sustain, from injury severity and calorie intake.
pub fn possible_intensity_rules() -> Vec<RuleSpec> {
    grid(
        INJURY,
        &["none", "minor", "moderate", "severe"],
        INTAKE,
        &["insufficient", "low", "adequate", "abundant"],
        &[
            "moderate", "intense", "very-intense", "very-intense",
            "light", "moderate", "moderate", "intense",
            "none", "very-light", "moderate", "moderate",
            "none", "none", "none", "none",
        ],
    )
}

// ── Regression values and priorities ────────────────────────────────────

/// Calorie delta per intake-adjustment conclusion (kcal/day).
pub const INTAKE_REGRESSION: [(&str, f64); 6] = [
    (DANGER, -500.0),
    ("large-deficit", -400.0),
    ("deficit", -200.0),
    ("hold", 0.0),
    ("surplus", 200.0),
    ("large-surplus", 400.0),
];

/// Intensity score per intensity conclusion.
pub const INTENSITY_REGRESSION: [(&str, f64); 6] = [
    ("none", 5.0),
    ("very-light", 10.0),
    ("light", 15.0),
    ("moderate", 20.0),
    ("intense", 25.0),
    ("very-intense", 30.0),
];

/// Goal labels from most to least ambitious, for dominant-goal selection.
pub fn goal_priority() -> Vec<Label> {
    vec![
        "large-gain".into(),
        "moderate-gain".into(),
        "maintain".into(),
        "loss".into(),
    ]
}

/// Regression values aligned with `value`'s label order.
pub fn regression_for(value: &GradedValue, table: &[(&str, f64)]) -> FuzzyResult<Vec<f64>> {
    value
        .labels()
        .iter()
        .map(|label| {
            table
                .iter()
                .find(|(name, _)| label == *name)
                .map(|&(_, v)| v)
                .ok_or_else(|| {
                    ConfigError::UnknownLabel {
                        variable: "regression table".to_string(),
                        label: label.to_string(),
                    }
                    .into()
                })
        })
        .collect()
}
