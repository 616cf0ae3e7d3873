//! Rule activation and max-union aggregation.

use serde::{Deserialize, Serialize};

use mamdani_core::errors::{ConfigError, FuzzyError, FuzzyResult};
use mamdani_core::GradedValue;

use crate::rules::RuleBase;

/// Combination operator for a rule's joint condition strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TNorm {
    /// Zadeh AND: the minimum of the condition degrees.
    #[default]
    Min,
    /// Algebraic product of the condition degrees.
    Product,
}

impl TNorm {
    /// Combine condition degrees into one activation.
    pub fn apply(&self, degrees: &[f64]) -> f64 {
        match self {
            TNorm::Min => degrees.iter().copied().fold(1.0, f64::min),
            TNorm::Product => degrees.iter().product(),
        }
    }
}

/// Evaluates a complete rule base over an ordered list of graded inputs.
///
/// Stateless across evaluations: [`Self::evaluate`] is a pure function of
/// the inputs it is handed, so independent engines may run in parallel over
/// immutable snapshots.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    rules: RuleBase,
    t_norm: TNorm,
}

impl InferenceEngine {
    /// Create an engine with the default `min` t-norm.
    pub fn new(rules: RuleBase) -> Self {
        Self {
            rules,
            t_norm: TNorm::Min,
        }
    }

    /// Create an engine with an explicit t-norm.
    pub fn with_t_norm(rules: RuleBase, t_norm: TNorm) -> Self {
        Self { rules, t_norm }
    }

    /// The validated rule table.
    pub fn rule_base(&self) -> &RuleBase {
        &self.rules
    }

    /// The combination operator.
    pub fn t_norm(&self) -> TNorm {
        self.t_norm
    }

    /// Evaluate the rule base over one graded input per source, in source
    /// order.
    ///
    /// Every rule's activation is the t-norm of its condition degrees;
    /// activations sharing a conclusion aggregate by max-union. Conclusions
    /// no rule triggers keep degree zero. The output label set is the rule
    /// base's conclusion set in first-seen order.
    pub fn evaluate(&self, inputs: &[&GradedValue]) -> FuzzyResult<GradedValue> {
        let sources = self.rules.sources();
        if inputs.len() != sources.len() {
            return Err(ConfigError::ConditionArityMismatch {
                expected: sources.len(),
                actual: inputs.len(),
            }
            .into());
        }
        for (input, schema) in inputs.iter().zip(sources.iter()) {
            if input.labels() != schema.labels() {
                let offending = input
                    .labels()
                    .iter()
                    .find(|l| !schema.labels().contains(l))
                    .or_else(|| schema.labels().iter().find(|l| input.position(l).is_none()))
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "label order".to_string());
                return Err(FuzzyError::LabelMismatch {
                    variable: schema.name().to_string(),
                    offending,
                });
            }
        }

        let mut output = self.rules.conclusion_template()?;
        let mut degrees = vec![0.0; inputs.len()];
        for (conditions, conclusion) in self.rules.iter_resolved() {
            for (slot, (&label_idx, input)) in
                degrees.iter_mut().zip(conditions.iter().zip(inputs.iter()))
            {
                *slot = input.degree_at(label_idx);
            }
            let activation = self.t_norm.apply(&degrees);
            if activation > output.degree_at(conclusion) {
                output.set_degree_at(conclusion, activation);
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_of_empty_is_one_and_product_is_one() {
        // A built rule base always has at least one source; this only pins
        // the fold identities.
        assert_eq!(TNorm::Min.apply(&[]), 1.0);
        assert_eq!(TNorm::Product.apply(&[]), 1.0);
    }

    #[test]
    fn t_norms_combine_as_expected() {
        assert_eq!(TNorm::Min.apply(&[0.5, 0.8]), 0.5);
        assert_eq!(TNorm::Product.apply(&[0.5, 0.8]), 0.4);
    }
}
