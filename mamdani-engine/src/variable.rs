//! Named fuzzy variables with an ordered labeled partition.

use mamdani_core::config::VariableSpec;
use mamdani_core::errors::{ConfigError, FuzzyError, FuzzyResult};
use mamdani_core::{GradedValue, Label};

use crate::membership::{MembershipFunction, Universe};
use crate::rules::SourceSchema;

/// A named quantity with a fixed ordered partition of labeled membership
/// functions.
///
/// The partition is immutable after construction; only the current graded
/// value mutates. It is recomputed either by fuzzifying a crisp scalar
/// against every partition member, or by direct assignment of a
/// [`GradedValue`] whose label set matches the partition.
#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    name: String,
    universe: Universe,
    terms: Vec<(Label, MembershipFunction)>,
    /// All-zero value over the partition labels, cloned by every fuzzify.
    template: GradedValue,
    current: Option<GradedValue>,
}

impl FuzzyVariable {
    /// Create a variable from an already-built partition.
    ///
    /// Rejects duplicate labels and empty partitions.
    pub fn new(
        name: impl Into<String>,
        universe: Universe,
        terms: Vec<(Label, MembershipFunction)>,
    ) -> FuzzyResult<Self> {
        let name = name.into();
        if terms.is_empty() {
            return Err(ConfigError::EmptyPartition { name }.into());
        }
        for (i, (label, _)) in terms.iter().enumerate() {
            if terms[..i].iter().any(|(l, _)| l == label) {
                return Err(ConfigError::DuplicateLabel {
                    variable: name.clone(),
                    label: label.to_string(),
                }
                .into());
            }
        }
        let template = GradedValue::new(terms.iter().map(|(l, _)| l.clone()).collect())?;
        Ok(Self {
            name,
            universe,
            terms,
            template,
            current: None,
        })
    }

    /// Build a variable from a config spec, sampling each trapezoid.
    pub fn from_spec(spec: &VariableSpec) -> FuzzyResult<Self> {
        let universe = Universe::from_spec(&spec.universe)?;
        let mut terms = Vec::with_capacity(spec.terms.len());
        for term in &spec.terms {
            let mf = MembershipFunction::trapezoid(&universe, term.breakpoints)?;
            terms.push((Label::from(term.label.as_str()), mf));
        }
        Self::new(spec.name.as_str(), universe, terms)
    }

    /// The variable name, unique within a pipeline.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The universe this variable is sampled over.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Partition labels in insertion order.
    pub fn labels(&self) -> Vec<Label> {
        self.terms.iter().map(|(l, _)| l.clone()).collect()
    }

    /// Number of partition members.
    pub fn partition_size(&self) -> usize {
        self.terms.len()
    }

    /// Name plus label list, as consumed by rule-base construction.
    pub fn schema(&self) -> SourceSchema {
        SourceSchema::new(self.name.clone(), self.labels())
    }

    /// Fuzzify a crisp value against every partition member, in partition
    /// order. Pure; does not touch the current value.
    pub fn fuzzify(&self, x: f64) -> GradedValue {
        let mut graded = self.template.clone();
        for (i, (_, mf)) in self.terms.iter().enumerate() {
            graded.set_degree_at(i, mf.degree_at(x));
        }
        graded
    }

    /// Recompute the current graded value from a crisp measurement.
    pub fn set_crisp(&mut self, x: f64) {
        self.current = Some(self.fuzzify(x));
    }

    /// Assign a graded value directly.
    ///
    /// The incoming label set must equal the partition's label set (as a
    /// set, ignoring order); degrees are reordered to partition order.
    /// Fails with [`FuzzyError::LabelMismatch`] otherwise.
    pub fn set_graded(&mut self, value: GradedValue) -> FuzzyResult<()> {
        if let Some(extra) = value.labels().iter().find(|l| !self.has_label(l)) {
            return Err(FuzzyError::LabelMismatch {
                variable: self.name.clone(),
                offending: extra.to_string(),
            });
        }
        let mut graded = self.template.clone();
        for (i, (label, _)) in self.terms.iter().enumerate() {
            let degree = value.degree(label).ok_or_else(|| FuzzyError::LabelMismatch {
                variable: self.name.clone(),
                offending: label.to_string(),
            })?;
            graded.set_degree_at(i, degree);
        }
        self.current = Some(graded);
        Ok(())
    }

    /// The current graded value.
    ///
    /// Reading a variable nobody has written is a configuration error:
    /// each variable must be written by exactly one producer per
    /// evaluation round before any engine reads it.
    pub fn current(&self) -> FuzzyResult<&GradedValue> {
        self.current.as_ref().ok_or_else(|| {
            ConfigError::UnsetVariable {
                name: self.name.clone(),
            }
            .into()
        })
    }

    fn has_label(&self, label: &Label) -> bool {
        self.terms.iter().any(|(l, _)| l == label)
    }
}
