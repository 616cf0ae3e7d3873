//! Criterion benchmarks for mamdani-engine.
//!
//! Covers the hot paths of one evaluation round: fuzzifying a crisp input
//! over a sampled partition, and evaluating a two-source rule base with
//! both t-norms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mamdani_core::config::{RuleSpec, TermSpec, UniverseSpec, VariableSpec};
use mamdani_engine::{FuzzyVariable, InferenceEngine, RuleBase, TNorm};

fn bmi_variable() -> FuzzyVariable {
    FuzzyVariable::from_spec(&VariableSpec::new(
        "bmi",
        UniverseSpec::new(10.0, 50.0, 1000),
        vec![
            TermSpec::new("underweight", [0.0, 0.0, 18.5, 20.0]),
            TermSpec::new("ideal", [18.5, 20.0, 25.0, 26.0]),
            TermSpec::new("overweight", [25.0, 26.0, 30.0, 31.0]),
            TermSpec::new("obese-1", [30.0, 31.0, 35.0, 36.0]),
            TermSpec::new("obese-2", [35.0, 36.0, 40.0, 41.0]),
            TermSpec::new("obese-3", [40.0, 41.0, 50.0, 50.0]),
        ],
    ))
    .unwrap()
}

fn body_fat_variable() -> FuzzyVariable {
    FuzzyVariable::from_spec(&VariableSpec::new(
        "body-fat",
        UniverseSpec::new(0.07, 0.25, 1000),
        vec![
            TermSpec::new("lean", [0.06, 0.06, 0.13, 0.14]),
            TermSpec::new("normal", [0.13, 0.14, 0.17, 0.18]),
            TermSpec::new("high", [0.17, 0.18, 0.24, 0.25]),
            TermSpec::new("very-high", [0.24, 0.25, 0.26, 0.26]),
        ],
    ))
    .unwrap()
}

fn condition_base(fat: &FuzzyVariable, bmi: &FuzzyVariable) -> RuleBase {
    let conclusions = ["low", "normal", "high"];
    let mut rules = Vec::new();
    let mut k = 0;
    for f in fat.labels() {
        for b in bmi.labels() {
            rules.push(RuleSpec::new(
                &[("body-fat", f.as_str()), ("bmi", b.as_str())],
                conclusions[k % conclusions.len()],
            ));
            k += 1;
        }
    }
    RuleBase::build(vec![fat.schema(), bmi.schema()], &rules).unwrap()
}

fn bench_fuzzify(c: &mut Criterion) {
    let bmi = bmi_variable();
    c.bench_function("fuzzify_1000_samples", |b| {
        b.iter(|| bmi.fuzzify(black_box(27.3)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let fat = body_fat_variable();
    let bmi = bmi_variable();
    let base = condition_base(&fat, &bmi);
    let fat_in = fat.fuzzify(0.18);
    let bmi_in = bmi.fuzzify(27.3);

    let min_engine = InferenceEngine::new(base.clone());
    c.bench_function("evaluate_24_rules_min", |b| {
        b.iter(|| min_engine.evaluate(black_box(&[&fat_in, &bmi_in])).unwrap())
    });

    let prod_engine = InferenceEngine::with_t_norm(base, TNorm::Product);
    c.bench_function("evaluate_24_rules_product", |b| {
        b.iter(|| prod_engine.evaluate(black_box(&[&fat_in, &bmi_in])).unwrap())
    });
}

fn bench_normalize_defuzzify(c: &mut Criterion) {
    let fat = body_fat_variable();
    let graded = fat.fuzzify(0.175);
    c.bench_function("normalize_and_defuzzify", |b| {
        b.iter(|| {
            let v = graded.clone().normalized().unwrap();
            v.defuzzify(black_box(&[5.0, 10.0, 20.0, 30.0]), 1.0).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_fuzzify,
    bench_evaluate,
    bench_normalize_defuzzify
);
criterion_main!(benches);
