use proptest::prelude::*;

use mamdani_core::config::RuleSpec;
use mamdani_core::GradedValue;
use mamdani_engine::{InferenceEngine, RuleBase, SourceSchema, TNorm};

fn sources() -> Vec<SourceSchema> {
    vec![
        SourceSchema::new("a", vec!["a0".into(), "a1".into()]),
        SourceSchema::new("b", vec!["b0".into(), "b1".into(), "b2".into()]),
    ]
}

fn rules() -> Vec<RuleSpec> {
    let conclusions = ["x", "y", "z", "x", "y", "z"];
    let mut out = Vec::new();
    let mut k = 0;
    for a in ["a0", "a1"] {
        for b in ["b0", "b1", "b2"] {
            out.push(RuleSpec::new(&[("a", a), ("b", b)], conclusions[k]));
            k += 1;
        }
    }
    out
}

fn graded(labels: &[&str], degrees: Vec<f64>) -> GradedValue {
    GradedValue::with_degrees(labels.iter().map(|&l| l.into()).collect(), degrees).unwrap()
}

fn degree() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

// ── Aggregation is independent of rule iteration order ──────────────────

proptest! {
    #[test]
    fn rule_order_is_irrelevant(
        a0 in degree(), a1 in degree(),
        b0 in degree(), b1 in degree(), b2 in degree(),
        seed in 0usize..720,
    ) {
        let input_a = graded(&["a0", "a1"], vec![a0, a1]);
        let input_b = graded(&["b0", "b1", "b2"], vec![b0, b1, b2]);

        let reference = InferenceEngine::new(RuleBase::build(sources(), &rules()).unwrap())
            .evaluate(&[&input_a, &input_b])
            .unwrap();

        // A seed-driven permutation of the rule list.
        let mut permuted = rules();
        let mut s = seed;
        for i in (1..permuted.len()).rev() {
            permuted.swap(i, s % (i + 1));
            s /= i + 1;
        }
        let shuffled = InferenceEngine::new(RuleBase::build(sources(), &permuted).unwrap())
            .evaluate(&[&input_a, &input_b])
            .unwrap();

        for (label, d) in reference.iter() {
            prop_assert_eq!(shuffled.degree(label), Some(d));
        }
    }
}

// ── Product never exceeds min ───────────────────────────────────────────

proptest! {
    #[test]
    fn product_activation_bounded_by_min(
        a0 in degree(), a1 in degree(),
        b0 in degree(), b1 in degree(), b2 in degree(),
    ) {
        let input_a = graded(&["a0", "a1"], vec![a0, a1]);
        let input_b = graded(&["b0", "b1", "b2"], vec![b0, b1, b2]);
        let base = RuleBase::build(sources(), &rules()).unwrap();

        let min_out = InferenceEngine::new(base.clone())
            .evaluate(&[&input_a, &input_b])
            .unwrap();
        let prod_out = InferenceEngine::with_t_norm(base, TNorm::Product)
            .evaluate(&[&input_a, &input_b])
            .unwrap();

        for (label, min_degree) in min_out.iter() {
            let prod_degree = prod_out.degree(label).unwrap();
            prop_assert!(prod_degree <= min_degree + 1e-12);
        }
    }
}

// ── Normalization idempotence and degeneracy ────────────────────────────

proptest! {
    #[test]
    fn normalize_is_idempotent_or_degenerate(
        d0 in degree(), d1 in degree(), d2 in degree(),
    ) {
        let v = graded(&["x", "y", "z"], vec![d0, d1, d2]);
        if v.is_degenerate() {
            prop_assert!(v.normalized().is_err());
        } else {
            let once = v.normalized().unwrap();
            let twice = once.clone().normalized().unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}

// ── Defuzzification is homogeneous of degree zero ───────────────────────

proptest! {
    #[test]
    fn defuzzify_ignores_uniform_scaling(
        d0 in 0.01f64..=1.0, d1 in degree(), d2 in degree(),
        scale in 0.05f64..=1.0,
        gamma in 0.25f64..=4.0,
    ) {
        let regression = [-500.0, 0.0, 400.0];
        let v = graded(&["x", "y", "z"], vec![d0, d1, d2]);
        let scaled = graded(&["x", "y", "z"], vec![d0 * scale, d1 * scale, d2 * scale]);

        let r1 = v.defuzzify(&regression, gamma).unwrap();
        let r2 = scaled.defuzzify(&regression, gamma).unwrap();
        prop_assert!((r1 - r2).abs() < 1e-6, "{} vs {}", r1, r2);
    }
}
