//! Serde-friendly definitions for variables and rule tables.
//!
//! These are the shapes a domain setup layer hands to the engine: plain
//! data, loadable from TOML or JSON, validated when the engine builds the
//! corresponding runtime objects.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_UNIVERSE_SAMPLES;
use crate::errors::{ConfigError, FuzzyResult};

/// Discretized universe descriptor: `samples` evenly spaced points
/// over `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniverseSpec {
    pub lo: f64,
    pub hi: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_samples() -> usize {
    DEFAULT_UNIVERSE_SAMPLES
}

impl UniverseSpec {
    pub fn new(lo: f64, hi: f64, samples: usize) -> Self {
        Self { lo, hi, samples }
    }
}

/// One labeled trapezoid in a partition, breakpoints in Kaufmann
/// notation `[a, b, c, d]` with `a ≤ b ≤ c ≤ d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    pub label: String,
    pub breakpoints: [f64; 4],
}

impl TermSpec {
    pub fn new(label: impl Into<String>, breakpoints: [f64; 4]) -> Self {
        Self {
            label: label.into(),
            breakpoints,
        }
    }
}

/// A fuzzy variable definition: universe plus ordered partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub universe: UniverseSpec,
    pub terms: Vec<TermSpec>,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, universe: UniverseSpec, terms: Vec<TermSpec>) -> Self {
        Self {
            name: name.into(),
            universe,
            terms,
        }
    }
}

/// One rule: an ordered list of `(source, label)` conditions and a
/// conclusion label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub when: Vec<(String, String)>,
    pub then: String,
}

impl RuleSpec {
    pub fn new(when: &[(&str, &str)], then: &str) -> Self {
        Self {
            when: when
                .iter()
                .map(|(s, l)| (s.to_string(), l.to_string()))
                .collect(),
            then: then.to_string(),
        }
    }
}

/// Top-level document for TOML/JSON variable catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSpec {
    pub variables: Vec<VariableSpec>,
}

impl CatalogSpec {
    /// Parse a catalog from TOML.
    pub fn from_toml(text: &str) -> FuzzyResult<Self> {
        toml::from_str(text).map_err(|e| {
            ConfigError::Parse {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Parse a catalog from JSON.
    pub fn from_json(text: &str) -> FuzzyResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            ConfigError::Parse {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_round_trips_through_toml() {
        let text = r#"
            [[variables]]
            name = "body-fat"

            [variables.universe]
            lo = 0.07
            hi = 0.25

            [[variables.terms]]
            label = "lean"
            breakpoints = [0.06, 0.06, 0.13, 0.14]
        "#;
        let catalog = CatalogSpec::from_toml(text).unwrap();
        assert_eq!(catalog.variables.len(), 1);
        let var = &catalog.variables[0];
        assert_eq!(var.name, "body-fat");
        assert_eq!(var.universe.samples, DEFAULT_UNIVERSE_SAMPLES);
        assert_eq!(var.terms[0].breakpoints, [0.06, 0.06, 0.13, 0.14]);
    }

    #[test]
    fn catalog_parses_json() {
        let text = r#"{
            "variables": [{
                "name": "bmi",
                "universe": { "lo": 10.0, "hi": 50.0, "samples": 100 },
                "terms": [
                    { "label": "underweight", "breakpoints": [0.0, 0.0, 18.5, 20.0] }
                ]
            }]
        }"#;
        let catalog = CatalogSpec::from_json(text).unwrap();
        assert_eq!(catalog.variables[0].universe.samples, 100);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = CatalogSpec::from_toml("variables = 3").unwrap_err();
        assert!(matches!(
            err,
            crate::FuzzyError::Config(ConfigError::Parse { .. })
        ));
    }
}
