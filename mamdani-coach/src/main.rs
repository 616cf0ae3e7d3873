use std::collections::BTreeMap;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mamdani_coach::profile::PartInputs;
use mamdani_coach::{build_plan, ActivityLevel, AthleteProfile, BodyPart, Sex};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut parts = BTreeMap::new();
    parts.insert(
        BodyPart::Arms,
        PartInputs {
            muscle_goal: 0.3,
            genetics: 1,
            injury: 0.0,
        },
    );
    parts.insert(
        BodyPart::Legs,
        PartInputs {
            muscle_goal: -0.1,
            genetics: 0,
            injury: 0.0,
        },
    );
    parts.insert(
        BodyPart::Back,
        PartInputs {
            muscle_goal: 0.7,
            genetics: 2,
            injury: 0.7,
        },
    );
    parts.insert(
        BodyPart::Torso,
        PartInputs {
            muscle_goal: -0.1,
            genetics: 3,
            injury: 0.4,
        },
    );

    let profile = AthleteProfile {
        age: 70,
        height_cm: 169.0,
        weight_kg: 60.0,
        sex: Sex::Male,
        activity: ActivityLevel::Sedentary,
        body_fat: 0.18,
        target_body_fat: 0.18,
        doping_response: None,
        parts,
    };

    let plan = build_plan(&profile)?;
    print!("{plan}");
    Ok(())
}
