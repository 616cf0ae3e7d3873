//! Priority-ordered objective selection.
//!
//! When several body parts carry different graded goals, one dominant goal
//! drives the nutrition chain. Selection applies an alpha-cut across every
//! branch first; when no label clears the cut, it falls back to any label
//! with non-zero activation, in priority order. This is also the fallback
//! policy applied when a graded value comes back degenerate.

use mamdani_core::errors::ConfigError;
use mamdani_core::{FuzzyResult, GradedValue, Label};

/// Pick the highest-priority label activated across `branches`.
///
/// `priority` lists labels from most to least preferred. A label is a
/// candidate when any branch grades it at or above `alpha`; with no such
/// candidate, any strictly positive activation qualifies. Returns `None`
/// only when every degree in every branch is zero.
pub fn dominant_label(branches: &[&GradedValue], priority: &[Label], alpha: f64) -> Option<Label> {
    let cleared: Vec<&Label> = priority
        .iter()
        .filter(|label| activation(branches, label) >= alpha)
        .collect();

    if let Some(&label) = cleared.first() {
        return Some(label.clone());
    }

    // Alpha-cut empty: fall back to any label that fired at all.
    priority
        .iter()
        .find(|label| activation(branches, label) > 0.0)
        .cloned()
}

/// One-hot graded value: `active` at 1.0, every other label at 0.0.
///
/// Fails when `active` is not one of `labels`; a one-hot value with no hot
/// label is a setup mistake, not a degenerate runtime condition.
pub fn one_hot(labels: Vec<Label>, active: &Label) -> FuzzyResult<GradedValue> {
    let mut value = GradedValue::new(labels)?;
    let idx = value.position(active).ok_or_else(|| ConfigError::UnknownLabel {
        variable: "objective".to_string(),
        label: active.to_string(),
    })?;
    value.set_degree_at(idx, 1.0);
    Ok(value)
}

fn activation(branches: &[&GradedValue], label: &Label) -> f64 {
    branches
        .iter()
        .filter_map(|branch| branch.degree(label))
        .fold(0.0, f64::max)
}
