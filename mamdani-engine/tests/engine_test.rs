use mamdani_core::config::RuleSpec;
use mamdani_core::{FuzzyError, GradedValue};
use mamdani_engine::{InferenceEngine, RuleBase, SourceSchema, TNorm};

fn two_by_two_sources() -> Vec<SourceSchema> {
    vec![
        SourceSchema::new("cond", vec!["weak".into(), "strong".into()]),
        SourceSchema::new("goal", vec!["hold".into(), "gain".into()]),
    ]
}

fn two_by_two_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new(&[("cond", "weak"), ("goal", "hold")], "easy"),
        RuleSpec::new(&[("cond", "weak"), ("goal", "gain")], "hard"),
        RuleSpec::new(&[("cond", "strong"), ("goal", "hold")], "easy"),
        RuleSpec::new(&[("cond", "strong"), ("goal", "gain")], "medium"),
    ]
}

fn graded(labels: &[&str], degrees: &[f64]) -> GradedValue {
    GradedValue::with_degrees(
        labels.iter().map(|&l| l.into()).collect(),
        degrees.to_vec(),
    )
    .unwrap()
}

// ── Half-degree inputs activate every rule at 0.5 under min ─────────────

#[test]
fn uniform_half_inputs_activate_all_rules_at_half() {
    let base = RuleBase::build(two_by_two_sources(), &two_by_two_rules()).unwrap();
    let engine = InferenceEngine::new(base);

    let cond = graded(&["weak", "strong"], &[0.5, 0.5]);
    let goal = graded(&["hold", "gain"], &[0.5, 0.5]);
    let out = engine.evaluate(&[&cond, &goal]).unwrap();

    // Every conclusion is reached by at least one rule at activation 0.5.
    for (label, degree) in out.iter() {
        assert!(
            (degree - 0.5).abs() < 1e-12,
            "conclusion {label} at {degree}"
        );
    }
    let labels: Vec<&str> = out.labels().iter().map(|l| l.as_str()).collect();
    assert_eq!(labels, ["easy", "hard", "medium"]);
}

// ── Untriggered conclusions stay at zero ────────────────────────────────

#[test]
fn silent_conclusions_keep_zero_degree() {
    let base = RuleBase::build(two_by_two_sources(), &two_by_two_rules()).unwrap();
    let engine = InferenceEngine::new(base);

    // Only the (weak, gain) rule can fire: conclusion "hard".
    let cond = graded(&["weak", "strong"], &[0.7, 0.0]);
    let goal = graded(&["hold", "gain"], &[0.0, 0.9]);
    let out = engine.evaluate(&[&cond, &goal]).unwrap();

    assert!((out.degree(&"hard".into()).unwrap() - 0.7).abs() < 1e-12);
    assert_eq!(out.degree(&"easy".into()), Some(0.0));
    assert_eq!(out.degree(&"medium".into()), Some(0.0));
}

// ── Rule iteration order does not affect the result ─────────────────────

#[test]
fn rule_permutations_yield_identical_output() {
    let cond = graded(&["weak", "strong"], &[0.3, 0.8]);
    let goal = graded(&["hold", "gain"], &[0.6, 0.4]);

    let mut rules = two_by_two_rules();
    let base = RuleBase::build(two_by_two_sources(), &rules).unwrap();
    let reference = InferenceEngine::new(base).evaluate(&[&cond, &goal]).unwrap();

    rules.reverse();
    let base = RuleBase::build(two_by_two_sources(), &rules).unwrap();
    let permuted = InferenceEngine::new(base).evaluate(&[&cond, &goal]).unwrap();

    for (label, degree) in reference.iter() {
        assert_eq!(permuted.degree(label), Some(degree));
    }

    rules.swap(0, 2);
    let base = RuleBase::build(two_by_two_sources(), &rules).unwrap();
    let swapped = InferenceEngine::new(base).evaluate(&[&cond, &goal]).unwrap();
    for (label, degree) in reference.iter() {
        assert_eq!(swapped.degree(label), Some(degree));
    }
}

// ── Product activation never exceeds min activation ─────────────────────

#[test]
fn product_t_norm_is_dominated_by_min() {
    let base = RuleBase::build(two_by_two_sources(), &two_by_two_rules()).unwrap();
    let min_engine = InferenceEngine::new(base.clone());
    let prod_engine = InferenceEngine::with_t_norm(base, TNorm::Product);

    let cond = graded(&["weak", "strong"], &[0.6, 0.9]);
    let goal = graded(&["hold", "gain"], &[0.4, 1.0]);
    let min_out = min_engine.evaluate(&[&cond, &goal]).unwrap();
    let prod_out = prod_engine.evaluate(&[&cond, &goal]).unwrap();

    for (label, min_degree) in min_out.iter() {
        let prod_degree = prod_out.degree(label).unwrap();
        assert!(
            prod_degree <= min_degree + 1e-12,
            "{label}: product {prod_degree} > min {min_degree}"
        );
    }
    // (strong=0.9, gain=1.0): one degree at 1.0, so product equals min.
    assert_eq!(prod_out.degree(&"medium".into()), Some(0.9));
}

// ── Input validation ────────────────────────────────────────────────────

#[test]
fn wrong_input_count_is_an_arity_error() {
    let base = RuleBase::build(two_by_two_sources(), &two_by_two_rules()).unwrap();
    let engine = InferenceEngine::new(base);
    let cond = graded(&["weak", "strong"], &[0.5, 0.5]);
    assert!(engine.evaluate(&[&cond]).is_err());
}

#[test]
fn mismatched_input_labels_are_rejected() {
    let base = RuleBase::build(two_by_two_sources(), &two_by_two_rules()).unwrap();
    let engine = InferenceEngine::new(base);
    let cond = graded(&["weak", "strong"], &[0.5, 0.5]);
    let wrong = graded(&["hold", "lose"], &[0.5, 0.5]);
    assert!(matches!(
        engine.evaluate(&[&cond, &wrong]).unwrap_err(),
        FuzzyError::LabelMismatch { .. }
    ));
}
