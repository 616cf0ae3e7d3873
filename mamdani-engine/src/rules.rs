//! Validated rule tables.
//!
//! A rule base maps every combination of input labels to one conclusion
//! label. Conditions are resolved to indices at construction time, so a
//! label typo is a construction-time [`ConfigError`] instead of a silent
//! zero-degree lookup at evaluation time.

use std::collections::HashSet;

use mamdani_core::config::RuleSpec;
use mamdani_core::errors::{ConfigError, FuzzyError, FuzzyResult};
use mamdani_core::{GradedValue, Label};

/// Name plus ordered label list of one engine input.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSchema {
    name: String,
    labels: Vec<Label>,
}

impl SourceSchema {
    pub fn new(name: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn partition_size(&self) -> usize {
        self.labels.len()
    }

    fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// One resolved rule: a label index per source (in source order) and a
/// conclusion index.
#[derive(Debug, Clone, PartialEq)]
struct Rule {
    conditions: Vec<usize>,
    conclusion: usize,
}

/// Complete, read-only rule table over an ordered list of sources.
///
/// Completeness is strict: the rule count must equal the Cartesian product
/// of the source partition sizes, and no two rules may share a condition
/// tuple. Together those imply every combination appears exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    sources: Vec<SourceSchema>,
    conclusions: Vec<Label>,
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Build and validate a rule base.
    ///
    /// Fails with [`FuzzyError::IncompleteRuleBase`] when the rule count is
    /// off, and with a [`ConfigError`] for unknown sources/labels, repeated
    /// conditions within a rule, or duplicate condition tuples.
    pub fn build(sources: Vec<SourceSchema>, rules: &[RuleSpec]) -> FuzzyResult<Self> {
        if sources.is_empty() {
            return Err(ConfigError::NoSources.into());
        }

        let expected: usize = sources.iter().map(SourceSchema::partition_size).product();
        if rules.len() != expected {
            return Err(FuzzyError::IncompleteRuleBase {
                expected,
                actual: rules.len(),
            });
        }

        let mut conclusions: Vec<Label> = Vec::new();
        let mut resolved = Vec::with_capacity(rules.len());
        let mut seen: HashSet<Vec<usize>> = HashSet::with_capacity(rules.len());

        for rule in rules {
            if rule.when.len() != sources.len() {
                return Err(ConfigError::ConditionArityMismatch {
                    expected: sources.len(),
                    actual: rule.when.len(),
                }
                .into());
            }

            // One slot per source; conditions may come in any order.
            let mut conditions: Vec<Option<usize>> = vec![None; sources.len()];
            for (source_name, label) in &rule.when {
                let source_idx = sources
                    .iter()
                    .position(|s| s.name() == source_name)
                    .ok_or_else(|| ConfigError::UnknownSource {
                        name: source_name.clone(),
                    })?;
                let label_idx = sources[source_idx].label_index(label).ok_or_else(|| {
                    ConfigError::UnknownLabel {
                        variable: source_name.clone(),
                        label: label.clone(),
                    }
                })?;
                if conditions[source_idx].replace(label_idx).is_some() {
                    return Err(ConfigError::DuplicateCondition {
                        variable: source_name.clone(),
                    }
                    .into());
                }
            }
            // Arity matched and every source appeared at most once, so all
            // slots are filled.
            let conditions: Vec<usize> = conditions.into_iter().map(|c| c.unwrap_or(0)).collect();

            if !seen.insert(conditions.clone()) {
                return Err(ConfigError::DuplicateRule {
                    conditions: describe_conditions(&sources, &conditions),
                }
                .into());
            }

            let conclusion_label = Label::from(rule.then.as_str());
            let conclusion = match conclusions.iter().position(|l| l == &conclusion_label) {
                Some(idx) => idx,
                None => {
                    conclusions.push(conclusion_label);
                    conclusions.len() - 1
                }
            };

            resolved.push(Rule {
                conditions,
                conclusion,
            });
        }

        // `expected` distinct tuples in a space of exactly `expected`
        // combinations: every combination is present exactly once.
        Ok(Self {
            sources,
            conclusions,
            rules: resolved,
        })
    }

    /// The ordered input schemas.
    pub fn sources(&self) -> &[SourceSchema] {
        &self.sources
    }

    /// Distinct conclusion labels, in first-seen rule-table order.
    pub fn conclusions(&self) -> &[Label] {
        &self.conclusions
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table holds no rules (never, for a built base).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Zero-degree value over the conclusion labels.
    pub fn conclusion_template(&self) -> FuzzyResult<GradedValue> {
        GradedValue::new(self.conclusions.clone())
    }

    /// Schema of this rule base's output, for wiring it as a downstream
    /// engine's source. Label order matches the evaluated output exactly.
    pub fn conclusion_schema(&self, name: impl Into<String>) -> SourceSchema {
        SourceSchema::new(name, self.conclusions.clone())
    }

    /// Iterate resolved rules as `(label indices per source, conclusion index)`.
    pub(crate) fn iter_resolved(&self) -> impl Iterator<Item = (&[usize], usize)> {
        self.rules
            .iter()
            .map(|r| (r.conditions.as_slice(), r.conclusion))
    }
}

fn describe_conditions(sources: &[SourceSchema], conditions: &[usize]) -> String {
    sources
        .iter()
        .zip(conditions.iter())
        .map(|(s, &idx)| format!("{}={}", s.name(), s.labels()[idx]))
        .collect::<Vec<_>>()
        .join(", ")
}
