//! Staged composition of inference engines.
//!
//! A pipeline owns named slots: fuzzy variables written by the caller, and
//! derived slots written by stages. A stage's inputs must name slots that
//! already exist when the stage is added, so a stage can never depend on
//! its own output and cycles are unrepresentable. Each slot has exactly one
//! producer per evaluation round; `run` evaluates stages in insertion order
//! so a later stage always reads the latest output of an earlier one.

use std::collections::HashMap;

use tracing::{debug, info};

use mamdani_core::errors::{ConfigError, FuzzyResult};
use mamdani_core::{GradedValue, Label};

use crate::engine::InferenceEngine;
use crate::variable::FuzzyVariable;

/// An unresolved stage definition: engine plus slot wiring by name.
#[derive(Debug, Clone)]
pub struct Stage {
    name: String,
    inputs: Vec<String>,
    output: String,
    engine: InferenceEngine,
    normalize: bool,
    sentinel: Option<Label>,
}

impl Stage {
    /// Define a stage reading `inputs` (in the engine's source order) and
    /// writing its conclusion to a new slot named `output`.
    pub fn new(
        name: impl Into<String>,
        inputs: &[&str],
        output: impl Into<String>,
        engine: InferenceEngine,
    ) -> Self {
        Self {
            name: name.into(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: output.into(),
            engine,
            normalize: false,
            sentinel: None,
        }
    }

    /// Normalize the stage output before storing it.
    pub fn normalized(mut self) -> Self {
        self.normalize = true;
        self
    }

    /// Halt the pipeline when this conclusion label carries non-zero degree.
    pub fn with_sentinel(mut self, label: impl Into<Label>) -> Self {
        self.sentinel = Some(label.into());
        self
    }
}

#[derive(Debug)]
enum Slot {
    Variable(FuzzyVariable),
    Derived {
        name: String,
        value: Option<GradedValue>,
    },
}

impl Slot {
    fn current(&self) -> FuzzyResult<&GradedValue> {
        match self {
            Slot::Variable(v) => v.current(),
            Slot::Derived { name, value } => value.as_ref().ok_or_else(|| {
                ConfigError::UnsetVariable { name: name.clone() }.into()
            }),
        }
    }
}

#[derive(Debug)]
struct ResolvedStage {
    name: String,
    inputs: Vec<usize>,
    output: usize,
    engine: InferenceEngine,
    normalize: bool,
    sentinel: Option<usize>,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every stage evaluated.
    Completed,
    /// A sentinel label fired; later stages were not evaluated.
    Halted {
        stage: String,
        label: Label,
        degree: f64,
    },
}

impl RunOutcome {
    pub fn halted(&self) -> bool {
        matches!(self, RunOutcome::Halted { .. })
    }
}

/// A directed acyclic sequence of inference stages over named slots.
#[derive(Debug, Default)]
pub struct Pipeline {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
    stages: Vec<ResolvedStage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fuzzy variable as an input slot.
    pub fn add_variable(&mut self, variable: FuzzyVariable) -> FuzzyResult<()> {
        self.reserve_name(variable.name())?;
        self.slots.push(Slot::Variable(variable));
        Ok(())
    }

    /// Add a stage, validating its wiring against the slots added so far.
    ///
    /// Inputs must reference existing slots; the stage's conclusion set
    /// becomes a new derived slot, so later stages can consume it.
    pub fn add_stage(&mut self, stage: Stage) -> FuzzyResult<()> {
        let sources = stage.engine.rule_base().sources();
        if stage.inputs.len() != sources.len() {
            return Err(ConfigError::ConditionArityMismatch {
                expected: sources.len(),
                actual: stage.inputs.len(),
            }
            .into());
        }

        let mut inputs = Vec::with_capacity(stage.inputs.len());
        for input in &stage.inputs {
            let idx = *self
                .index
                .get(input.as_str())
                .ok_or_else(|| ConfigError::UnknownSource {
                    name: input.clone(),
                })?;
            inputs.push(idx);
        }

        let sentinel = match &stage.sentinel {
            Some(label) => Some(
                stage
                    .engine
                    .rule_base()
                    .conclusions()
                    .iter()
                    .position(|l| l == label)
                    .ok_or_else(|| ConfigError::UnknownLabel {
                        variable: stage.name.clone(),
                        label: label.to_string(),
                    })?,
            ),
            None => None,
        };

        self.reserve_name(&stage.output)?;
        self.slots.push(Slot::Derived {
            name: stage.output.clone(),
            value: None,
        });
        let output = self.slots.len() - 1;

        self.stages.push(ResolvedStage {
            name: stage.name,
            inputs,
            output,
            engine: stage.engine,
            normalize: stage.normalize,
            sentinel,
        });
        Ok(())
    }

    /// Assign a crisp value to a variable slot.
    pub fn set_crisp(&mut self, name: &str, x: f64) -> FuzzyResult<()> {
        self.variable_mut(name)?.set_crisp(x);
        Ok(())
    }

    /// Assign a graded value directly to a variable slot.
    pub fn set_graded(&mut self, name: &str, value: GradedValue) -> FuzzyResult<()> {
        self.variable_mut(name)?.set_graded(value)
    }

    /// Evaluate every stage in insertion order.
    ///
    /// After each stage the sentinel, if any, is checked explicitly: a
    /// non-zero degree halts the run and reports which stage and label
    /// fired. Degenerate stage outputs under normalization propagate as
    /// [`mamdani_core::FuzzyError::DegenerateValue`] for the caller's
    /// fallback policy.
    pub fn run(&mut self) -> FuzzyResult<RunOutcome> {
        for stage_idx in 0..self.stages.len() {
            let stage = &self.stages[stage_idx];
            let inputs: Vec<&GradedValue> = stage
                .inputs
                .iter()
                .map(|&i| self.slots[i].current())
                .collect::<FuzzyResult<_>>()?;

            let mut output = stage.engine.evaluate(&inputs)?;
            if stage.normalize {
                output.normalize()?;
            }
            debug!(stage = %stage.name, output = %output, "stage evaluated");

            let sentinel = stage
                .sentinel
                .map(|idx| (stage.engine.rule_base().conclusions()[idx].clone(), output.degree_at(idx)));

            let output_slot = stage.output;
            let stage_name = self.stages[stage_idx].name.clone();
            if let Slot::Derived { value, .. } = &mut self.slots[output_slot] {
                *value = Some(output);
            }

            if let Some((label, degree)) = sentinel {
                if degree > 0.0 {
                    info!(stage = %stage_name, %label, degree, "sentinel fired, halting pipeline");
                    return Ok(RunOutcome::Halted {
                        stage: stage_name,
                        label,
                        degree,
                    });
                }
            }
        }
        Ok(RunOutcome::Completed)
    }

    /// The current graded value of any slot.
    pub fn value(&self, name: &str) -> FuzzyResult<&GradedValue> {
        self.slot(name)?.current()
    }

    /// Defuzzify a slot's current value with the gamma-weighted centroid.
    pub fn defuzzify(&self, name: &str, regression: &[f64], gamma: f64) -> FuzzyResult<f64> {
        self.value(name)?.defuzzify(regression, gamma)
    }

    fn slot(&self, name: &str) -> FuzzyResult<&Slot> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ConfigError::UnknownSource {
                name: name.to_string(),
            })?;
        Ok(&self.slots[idx])
    }

    fn variable_mut(&mut self, name: &str) -> FuzzyResult<&mut FuzzyVariable> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ConfigError::UnknownSource {
                name: name.to_string(),
            })?;
        match &mut self.slots[idx] {
            Slot::Variable(v) => Ok(v),
            Slot::Derived { name, .. } => Err(ConfigError::UnknownSource {
                name: format!("{name} is a derived slot, not a variable"),
            }
            .into()),
        }
    }

    fn reserve_name(&mut self, name: &str) -> FuzzyResult<()> {
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateSlot {
                name: name.to_string(),
            }
            .into());
        }
        self.index.insert(name.to_string(), self.slots.len());
        Ok(())
    }
}
