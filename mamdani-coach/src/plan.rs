//! Full coaching run: nutrition pipeline, per-part training branches, and
//! the weekly schedule.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use mamdani_core::constants::{DEFAULT_ALPHA_CUT, DEFAULT_GAMMA};
use mamdani_core::{GradedValue, Label};
use mamdani_engine::{InferenceEngine, Pipeline, RuleBase, RunOutcome, Stage};

use crate::catalog::{
    self, BMI, BODY_FAT, CONDITION, DANGER, DOPING, GENETICS, GOAL, INJURY, INTAKE,
    INTAKE_ADJUSTMENT, INTAKE_REGRESSION, INTENSITY_REGRESSION, NEEDED, NEEDED_MID,
    NUTRITION_PROVISIONAL, POSSIBLE, TARGET_FAT,
};
use crate::error::{CoachError, CoachResult};
use crate::nutrition::{macro_split, maintenance_calories, MacroSplit};
use crate::objectives::{dominant_label, one_hot};
use crate::profile::{AthleteProfile, BodyPart, PartInputs};

const MAX_TRAINING_DAYS: usize = 6;
const MAX_SESSIONS_PER_PART: u8 = 2;

/// Session effort, classified from the real intensity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Light,
    Moderate,
    Intense,
    VeryIntense,
}

impl Effort {
    /// Classify an intensity score; `None` means the part is not worth a
    /// session this week.
    pub fn classify(score: f64) -> Option<Effort> {
        if score > 20.0 {
            Some(Effort::VeryIntense)
        } else if score > 15.0 {
            Some(Effort::Intense)
        } else if score > 10.0 {
            Some(Effort::Moderate)
        } else if score > 5.0 {
            Some(Effort::Light)
        } else {
            None
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Effort::Light => "light",
            Effort::Moderate => "moderate",
            Effort::Intense => "intense",
            Effort::VeryIntense => "very intense",
        };
        f.write_str(name)
    }
}

/// One day of the weekly schedule. `work` is `None` on rest days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub day: u8,
    pub work: Option<(BodyPart, Effort)>,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.work {
            Some((part, effort)) => write!(f, "day {}: {part} ({effort})", self.day),
            None => write!(f, "day {}: rest", self.day),
        }
    }
}

/// The complete plan produced by [`build_plan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub maintenance_calories: f64,
    pub calorie_target: f64,
    pub macros: MacroSplit,
    /// Real intensity score per body part, min of needed and sustainable.
    pub intensities: BTreeMap<BodyPart, f64>,
    pub schedule: Vec<Session>,
}

impl fmt::Display for TrainingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "maintenance: {:.0} kcal/day", self.maintenance_calories)?;
        writeln!(f, "target:      {:.0} kcal/day", self.calorie_target)?;
        writeln!(
            f,
            "macros:      {}g carbs, {}g protein, {}g fat",
            self.macros.carbs_g, self.macros.protein_g, self.macros.fat_g
        )?;
        for session in &self.schedule {
            writeln!(f, "{session}")?;
        }
        Ok(())
    }
}

/// Evaluate a full coaching run for `profile`.
///
/// Fails with [`CoachError::UnsafeGoal`] when a nutrition stage raises the
/// danger conclusion, meaning the requested goals cannot be pursued safely.
pub fn build_plan(profile: &AthleteProfile) -> CoachResult<TrainingPlan> {
    profile.validate()?;

    let maintenance = maintenance_calories(profile);
    let (goal_labels, dominant) = dominant_goal(profile)?;
    info!(goal = %dominant, maintenance_kcal = maintenance, "coaching run started");

    let mut pipeline = nutrition_pipeline()?;
    pipeline.set_crisp(BODY_FAT, profile.body_fat)?;
    pipeline.set_crisp(BMI, profile.bmi())?;
    // The target drives the adjustment stage at full height: a target in a
    // trapezoid overlap would otherwise weaken every rule it touches.
    let target = catalog::body_fat_variable(TARGET_FAT)?;
    pipeline.set_graded(
        TARGET_FAT,
        target.fuzzify(profile.target_body_fat).normalized()?,
    )?;
    pipeline.set_graded(GOAL, one_hot(goal_labels, &dominant)?)?;
    match pipeline.run()? {
        RunOutcome::Completed => {}
        RunOutcome::Halted { stage, label, .. } => {
            return Err(CoachError::UnsafeGoal { stage, label });
        }
    }

    let adjustment = pipeline.value(INTAKE_ADJUSTMENT)?;
    let regression = catalog::regression_for(adjustment, &INTAKE_REGRESSION)?;
    let delta = adjustment.defuzzify(&regression, DEFAULT_GAMMA)?;
    let calorie_target = maintenance + delta;
    let macros = macro_split(calorie_target);
    info!(delta_kcal = delta, target_kcal = calorie_target, "calorie target set");

    let doping = f64::from(profile.doping_response.unwrap_or(0));
    let intensities: BTreeMap<BodyPart, f64> = BodyPart::ALL
        .par_iter()
        .map(|&part| {
            let inputs = part_inputs(profile, part)?;
            let score = part_score(part, inputs, doping, calorie_target)?;
            debug!(part = %part, score, "part intensity evaluated");
            Ok((part, score))
        })
        .collect::<CoachResult<_>>()?;

    let schedule = build_schedule(&intensities);
    Ok(TrainingPlan {
        maintenance_calories: maintenance,
        calorie_target,
        macros,
        intensities,
        schedule,
    })
}

fn part_inputs(profile: &AthleteProfile, part: BodyPart) -> CoachResult<&PartInputs> {
    profile.parts.get(&part).ok_or_else(|| CoachError::InvalidProfile {
        reason: format!("missing inputs for {part}"),
    })
}

/// The single goal the nutrition stages plan around: the highest-priority
/// goal any part clears the alpha cut for, `maintain` when every part is
/// indifferent.
fn dominant_goal(profile: &AthleteProfile) -> CoachResult<(Vec<Label>, Label)> {
    let goal_var = catalog::muscle_goal_variable()?;
    let mut branches = Vec::with_capacity(BodyPart::ALL.len());
    for part in BodyPart::ALL {
        let inputs = part_inputs(profile, part)?;
        branches.push(goal_var.fuzzify(inputs.muscle_goal).normalized()?);
    }
    let refs: Vec<&GradedValue> = branches.iter().collect();
    let dominant = dominant_label(&refs, &catalog::goal_priority(), DEFAULT_ALPHA_CUT)
        .unwrap_or_else(|| Label::from("maintain"));
    Ok((goal_var.labels(), dominant))
}

/// Body fat and BMI decide the biological condition; condition and the
/// dominant goal give a provisional verdict; the body-fat target refines
/// it into the final intake adjustment. Both nutrition stages carry the
/// danger sentinel.
fn nutrition_pipeline() -> CoachResult<Pipeline> {
    let body_fat = catalog::body_fat_variable(BODY_FAT)?;
    let bmi = catalog::bmi_variable()?;
    let goal = catalog::muscle_goal_variable()?;
    let target = catalog::body_fat_variable(TARGET_FAT)?;

    let condition = RuleBase::build(
        vec![body_fat.schema(), bmi.schema()],
        &catalog::condition_rules(),
    )?;
    let provisional = RuleBase::build(
        vec![condition.conclusion_schema(CONDITION), goal.schema()],
        &catalog::nutrition_provisional_rules(),
    )?;
    let adjustment = RuleBase::build(
        vec![
            provisional.conclusion_schema(NUTRITION_PROVISIONAL),
            target.schema(),
        ],
        &catalog::intake_adjustment_rules(),
    )?;

    let mut pipeline = Pipeline::new();
    pipeline.add_variable(body_fat)?;
    pipeline.add_variable(bmi)?;
    pipeline.add_variable(goal)?;
    pipeline.add_variable(target)?;
    pipeline.add_stage(
        Stage::new(
            "condition",
            &[BODY_FAT, BMI],
            CONDITION,
            InferenceEngine::new(condition),
        )
        .normalized(),
    )?;
    pipeline.add_stage(
        Stage::new(
            "nutrition-provisional",
            &[CONDITION, GOAL],
            NUTRITION_PROVISIONAL,
            InferenceEngine::new(provisional),
        )
        .with_sentinel(DANGER),
    )?;
    pipeline.add_stage(
        Stage::new(
            "intake-adjustment",
            &[NUTRITION_PROVISIONAL, TARGET_FAT],
            INTAKE_ADJUSTMENT,
            InferenceEngine::new(adjustment),
        )
        .normalized()
        .with_sentinel(DANGER),
    )?;
    Ok(pipeline)
}

/// Genetics and the part goal give the needed intensity, corrected by
/// doping responsiveness; injury and the calorie target bound what the
/// part can sustain.
fn training_pipeline() -> CoachResult<Pipeline> {
    let genetics = catalog::genetics_variable()?;
    let goal = catalog::muscle_goal_variable()?;
    let doping = catalog::doping_variable()?;
    let injury = catalog::injury_variable()?;
    let intake = catalog::intake_variable()?;

    let needed = RuleBase::build(
        vec![genetics.schema(), goal.schema()],
        &catalog::needed_intensity_rules(),
    )?;
    let corrected = RuleBase::build(
        vec![needed.conclusion_schema(NEEDED_MID), doping.schema()],
        &catalog::doping_correction_rules(),
    )?;
    let possible = RuleBase::build(
        vec![injury.schema(), intake.schema()],
        &catalog::possible_intensity_rules(),
    )?;

    let mut pipeline = Pipeline::new();
    pipeline.add_variable(genetics)?;
    pipeline.add_variable(goal)?;
    pipeline.add_variable(doping)?;
    pipeline.add_variable(injury)?;
    pipeline.add_variable(intake)?;
    pipeline.add_stage(
        Stage::new(
            "needed-base",
            &[GENETICS, GOAL],
            NEEDED_MID,
            InferenceEngine::new(needed),
        )
        .normalized(),
    )?;
    pipeline.add_stage(
        Stage::new(
            "needed",
            &[NEEDED_MID, DOPING],
            NEEDED,
            InferenceEngine::new(corrected),
        )
        .normalized(),
    )?;
    pipeline.add_stage(
        Stage::new(
            "possible",
            &[INJURY, INTAKE],
            POSSIBLE,
            InferenceEngine::new(possible),
        )
        .normalized(),
    )?;
    Ok(pipeline)
}

/// Real intensity for one part: min of the needed and the sustainable
/// score. A degenerate branch means no rule fires at all for this part,
/// which scores it out of the schedule rather than failing the run.
fn part_score(
    part: BodyPart,
    inputs: &PartInputs,
    doping: f64,
    calorie_target: f64,
) -> CoachResult<f64> {
    let mut pipeline = training_pipeline()?;
    pipeline.set_crisp(GENETICS, f64::from(inputs.genetics))?;
    pipeline.set_crisp(GOAL, inputs.muscle_goal)?;
    pipeline.set_crisp(DOPING, doping)?;
    pipeline.set_crisp(INJURY, inputs.injury)?;
    pipeline.set_crisp(INTAKE, calorie_target)?;

    match pipeline.run() {
        Ok(_) => {}
        Err(e) if e.is_degenerate() => {
            warn!(part = %part, "no rule fired for part, scoring zero");
            return Ok(0.0);
        }
        Err(e) => return Err(e.into()),
    }

    let needed = pipeline.value(NEEDED)?;
    let needed_score =
        needed.defuzzify(&catalog::regression_for(needed, &INTENSITY_REGRESSION)?, DEFAULT_GAMMA)?;
    let possible = pipeline.value(POSSIBLE)?;
    let possible_score = possible
        .defuzzify(&catalog::regression_for(possible, &INTENSITY_REGRESSION)?, DEFAULT_GAMMA)?;
    Ok(needed_score.min(possible_score))
}

/// Round-robin over parts by descending intensity, at most two sessions
/// per part and six training days; rest days fill the remainder.
fn build_schedule(intensities: &BTreeMap<BodyPart, f64>) -> Vec<Session> {
    let mut order: Vec<(BodyPart, f64)> = intensities.iter().map(|(&p, &s)| (p, s)).collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut sessions = Vec::with_capacity(MAX_TRAINING_DAYS);
    let mut trained: BTreeMap<BodyPart, u8> = BodyPart::ALL.iter().map(|&p| (p, 0)).collect();

    while sessions.len() < MAX_TRAINING_DAYS {
        let mut added = false;
        for &(part, score) in &order {
            if sessions.len() == MAX_TRAINING_DAYS {
                break;
            }
            if trained.get(&part).copied().unwrap_or(0) >= MAX_SESSIONS_PER_PART {
                continue;
            }
            let Some(effort) = Effort::classify(score) else {
                continue;
            };
            sessions.push(Session {
                day: sessions.len() as u8 + 1,
                work: Some((part, effort)),
            });
            if let Some(count) = trained.get_mut(&part) {
                *count += 1;
            }
            added = true;
        }
        if !added && sessions.len() < MAX_TRAINING_DAYS {
            sessions.push(Session {
                day: sessions.len() as u8 + 1,
                work: None,
            });
        }
    }
    sessions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effort_classification_thresholds() {
        assert_eq!(Effort::classify(30.0), Some(Effort::VeryIntense));
        assert_eq!(Effort::classify(20.0), Some(Effort::Intense));
        assert_eq!(Effort::classify(15.0), Some(Effort::Moderate));
        assert_eq!(Effort::classify(10.0), Some(Effort::Light));
        assert_eq!(Effort::classify(5.0), None);
        assert_eq!(Effort::classify(0.0), None);
    }

    #[test]
    fn schedule_caps_sessions_per_part() {
        let intensities: BTreeMap<BodyPart, f64> =
            BodyPart::ALL.iter().map(|&p| (p, 25.0)).collect();
        let schedule = build_schedule(&intensities);
        assert_eq!(schedule.len(), 6);
        for part in BodyPart::ALL {
            let count = schedule
                .iter()
                .filter(|s| matches!(s.work, Some((p, _)) if p == part))
                .count();
            assert!(count <= 2);
        }
        assert!(schedule.iter().all(|s| s.work.is_some()));
    }

    #[test]
    fn schedule_fills_rest_when_no_part_qualifies() {
        let intensities: BTreeMap<BodyPart, f64> =
            BodyPart::ALL.iter().map(|&p| (p, 3.0)).collect();
        let schedule = build_schedule(&intensities);
        assert_eq!(schedule.len(), 6);
        assert!(schedule.iter().all(|s| s.work.is_none()));
    }

    #[test]
    fn schedule_orders_hardest_part_first() {
        let mut intensities = BTreeMap::new();
        intensities.insert(BodyPart::Arms, 12.0);
        intensities.insert(BodyPart::Legs, 28.0);
        intensities.insert(BodyPart::Back, 6.0);
        intensities.insert(BodyPart::Torso, 2.0);
        let schedule = build_schedule(&intensities);
        assert_eq!(schedule[0].work, Some((BodyPart::Legs, Effort::VeryIntense)));
        assert_eq!(schedule[1].work, Some((BodyPart::Arms, Effort::Moderate)));
        assert_eq!(schedule[2].work, Some((BodyPart::Back, Effort::Light)));
    }
}
