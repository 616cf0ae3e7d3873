use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ConfigError, FuzzyError, FuzzyResult};
use crate::label::Label;

/// Ordered mapping from label to degree of truth in [0.0, 1.0].
///
/// The common currency between inference stages: a variable's fuzzified
/// value, a rule base's evaluated output, and a pipeline edge are all
/// `GradedValue`s. The label set and its order are fixed at construction;
/// only degrees mutate (under normalization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedValue {
    labels: Vec<Label>,
    degrees: Vec<f64>,
}

impl GradedValue {
    /// Create a zero-degree value over the given labels.
    ///
    /// Rejects duplicate labels.
    pub fn new(labels: Vec<Label>) -> FuzzyResult<Self> {
        let degrees = vec![0.0; labels.len()];
        Self::with_degrees(labels, degrees)
    }

    /// Create a value with explicit degrees, clamped to [0.0, 1.0].
    ///
    /// `degrees` must align with `labels` positionally.
    pub fn with_degrees(labels: Vec<Label>, degrees: Vec<f64>) -> FuzzyResult<Self> {
        if degrees.len() != labels.len() {
            return Err(ConfigError::DegreeArityMismatch {
                expected: labels.len(),
                actual: degrees.len(),
            }
            .into());
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ConfigError::DuplicateLabel {
                    variable: "graded value".to_string(),
                    label: label.to_string(),
                }
                .into());
            }
        }
        let degrees = degrees.into_iter().map(|d| d.clamp(0.0, 1.0)).collect();
        Ok(Self { labels, degrees })
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the value has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in construction order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Degrees aligned with [`Self::labels`].
    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// Degree for a label, if present.
    pub fn degree(&self, label: &Label) -> Option<f64> {
        self.position(label).map(|i| self.degrees[i])
    }

    /// Degree at a positional index.
    pub fn degree_at(&self, index: usize) -> f64 {
        self.degrees[index]
    }

    /// Positional index of a label.
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Iterate over `(label, degree)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, f64)> {
        self.labels.iter().zip(self.degrees.iter().copied())
    }

    /// Height of the value: the maximum degree.
    pub fn height(&self) -> f64 {
        self.degrees.iter().copied().fold(0.0, f64::max)
    }

    /// True when every degree is exactly zero.
    pub fn is_degenerate(&self) -> bool {
        self.degrees.iter().all(|&d| d == 0.0)
    }

    /// Divide every degree by the height so at least one label reaches 1.0.
    ///
    /// Fails with [`FuzzyError::DegenerateValue`] when every degree is zero;
    /// there is no silent fallback, callers decide the policy.
    pub fn normalize(&mut self) -> FuzzyResult<()> {
        let height = self.height();
        if height == 0.0 {
            return Err(FuzzyError::DegenerateValue);
        }
        for degree in &mut self.degrees {
            *degree /= height;
        }
        Ok(())
    }

    /// Consuming variant of [`Self::normalize`].
    pub fn normalized(mut self) -> FuzzyResult<Self> {
        self.normalize()?;
        Ok(self)
    }

    /// Gamma-weighted centroid defuzzification.
    ///
    /// `regression` aligns positionally with the label order;
    /// the result is `Σ(rᵢ · dᵢ^γ) / Σ(dᵢ^γ)`. Gamma 1 is the plain
    /// weighted average; larger gamma sharpens toward high-confidence
    /// labels, smaller gamma flattens differences.
    ///
    /// Fails with [`FuzzyError::DegenerateValue`] when the denominator is
    /// zero (every degree is zero).
    pub fn defuzzify(&self, regression: &[f64], gamma: f64) -> FuzzyResult<f64> {
        if regression.len() != self.labels.len() {
            return Err(ConfigError::RegressionArityMismatch {
                expected: self.labels.len(),
                actual: regression.len(),
            }
            .into());
        }
        if gamma <= 0.0 || !gamma.is_finite() {
            return Err(ConfigError::InvalidGamma { gamma }.into());
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&value, &degree) in regression.iter().zip(self.degrees.iter()) {
            // 0^gamma = 0 for gamma > 0, so silent labels contribute nothing.
            let weight = degree.powf(gamma);
            numerator += value * weight;
            denominator += weight;
        }

        if denominator > 0.0 {
            Ok(numerator / denominator)
        } else {
            Err(FuzzyError::DegenerateValue)
        }
    }

    /// Replace the degree at a positional index, clamped to [0.0, 1.0].
    ///
    /// The label set never changes; this is the only mutation besides
    /// normalization.
    pub fn set_degree_at(&mut self, index: usize, degree: f64) {
        self.degrees[index] = degree.clamp(0.0, 1.0);
    }
}

/// Compact `{label: degree, ...}` rendering for logs and diagnostics.
impl fmt::Display for GradedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, degree)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label}: {degree:.2}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(pairs: &[(&str, f64)]) -> GradedValue {
        let labels = pairs.iter().map(|(l, _)| Label::from(*l)).collect();
        let degrees = pairs.iter().map(|(_, d)| *d).collect();
        GradedValue::with_degrees(labels, degrees).unwrap()
    }

    #[test]
    fn rejects_duplicate_labels() {
        let err = GradedValue::new(vec!["a".into(), "a".into()]).unwrap_err();
        assert!(matches!(
            err,
            FuzzyError::Config(ConfigError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn degrees_clamp_to_unit_interval() {
        let v = value(&[("a", -0.5), ("b", 1.5)]);
        assert_eq!(v.degrees(), &[0.0, 1.0]);
    }

    #[test]
    fn normalize_scales_height_to_one() {
        let mut v = value(&[("a", 0.2), ("b", 0.4)]);
        v.normalize().unwrap();
        assert_eq!(v.degree(&"a".into()), Some(0.5));
        assert_eq!(v.degree(&"b".into()), Some(1.0));
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut v = value(&[("a", 0.1), ("b", 0.7), ("c", 0.3)]);
        v.normalize().unwrap();
        let once = v.clone();
        v.normalize().unwrap();
        assert_eq!(v, once);
    }

    #[test]
    fn all_zero_value_is_degenerate_everywhere() {
        let mut v = value(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]);
        assert!(v.is_degenerate());
        assert_eq!(v.clone().normalize().unwrap_err(), FuzzyError::DegenerateValue);
        assert_eq!(
            v.defuzzify(&[1.0, 2.0, 3.0], 1.0).unwrap_err(),
            FuzzyError::DegenerateValue
        );
        assert_eq!(v.normalize().unwrap_err(), FuzzyError::DegenerateValue);
    }

    #[test]
    fn defuzzify_gamma_one_is_weighted_average() {
        let v = value(&[("a", 0.5), ("b", 0.25)]);
        let result = v.defuzzify(&[10.0, 20.0], 1.0).unwrap();
        let expected = (10.0 * 0.5 + 20.0 * 0.25) / 0.75;
        assert!((result - expected).abs() < 1e-12);
    }

    #[test]
    fn defuzzify_is_scale_invariant() {
        let base = value(&[("a", 0.8), ("b", 0.2), ("c", 0.4)]);
        let scaled = value(&[("a", 0.4), ("b", 0.1), ("c", 0.2)]);
        let regression = [-500.0, 0.0, 400.0];
        for gamma in [0.5, 1.0, 2.0] {
            let r1 = base.defuzzify(&regression, gamma).unwrap();
            let r2 = scaled.defuzzify(&regression, gamma).unwrap();
            assert!((r1 - r2).abs() < 1e-9, "gamma {gamma}: {r1} vs {r2}");
        }
    }

    #[test]
    fn defuzzify_rejects_bad_gamma_and_arity() {
        let v = value(&[("a", 0.5), ("b", 0.5)]);
        assert!(matches!(
            v.defuzzify(&[1.0, 2.0], 0.0).unwrap_err(),
            FuzzyError::Config(ConfigError::InvalidGamma { .. })
        ));
        assert!(matches!(
            v.defuzzify(&[1.0], 1.0).unwrap_err(),
            FuzzyError::Config(ConfigError::RegressionArityMismatch { expected: 2, actual: 1 })
        ));
    }
}
