//! Runtime configuration loaded from the environment.
//!
//! Unset or unparseable variables fall back to defaults so a bare process
//! reproduces the reference model (seed 42, 1000 samples, 100 trees).

use std::env;
use std::str::FromStr;

use crate::training::domain::{ForestConfig, TrainConfig};

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug, PartialEq)]
pub struct AppCfg {
    pub seed: u64,
    pub samples: usize,
    pub trees: usize,
    pub test_fraction: f64,
    pub workers: usize,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 1000,
            trees: 100,
            test_fraction: 0.2,
            workers: 4,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(raw: Option<String>, default: T) -> T {
            raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
        }

        let defaults = Self::default();
        let test_fraction = parsed(
            lookup("STUDY_ADVISOR_TEST_FRACTION"),
            defaults.test_fraction,
        );

        Self {
            seed: parsed(lookup("STUDY_ADVISOR_SEED"), defaults.seed),
            samples: parsed(lookup("STUDY_ADVISOR_SAMPLES"), defaults.samples),
            trees: parsed(lookup("STUDY_ADVISOR_TREES"), defaults.trees),
            test_fraction: if (0.0..1.0).contains(&test_fraction) {
                test_fraction
            } else {
                defaults.test_fraction
            },
            workers: parsed(lookup("STUDY_ADVISOR_WORKERS"), defaults.workers).max(1),
            log_level: lookup("STUDY_ADVISOR_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parsed(lookup("STUDY_ADVISOR_LOG_JSON"), defaults.log_json),
        }
    }

    /// Training parameters derived from this snapshot.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            samples: self.samples,
            seed: self.seed,
            test_fraction: self.test_fraction,
            forest: ForestConfig {
                n_trees: self.trees,
                seed: self.seed,
                ..ForestConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = AppCfg::from_lookup(|_| None);
        assert_eq!(cfg, AppCfg::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppCfg::from_lookup(lookup_from(&[
            ("STUDY_ADVISOR_SEED", "7"),
            ("STUDY_ADVISOR_SAMPLES", "250"),
            ("STUDY_ADVISOR_TREES", "10"),
            ("STUDY_ADVISOR_LOG_JSON", "true"),
        ]));
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.samples, 250);
        assert_eq!(cfg.trees, 10);
        assert!(cfg.log_json);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = AppCfg::from_lookup(lookup_from(&[
            ("STUDY_ADVISOR_SEED", "forty-two"),
            ("STUDY_ADVISOR_TEST_FRACTION", "1.5"),
            ("STUDY_ADVISOR_WORKERS", "0"),
        ]));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.test_fraction, 0.2);
        assert_eq!(cfg.workers, 1);
    }

    #[test]
    fn train_config_threads_seed_everywhere() {
        let cfg = AppCfg {
            seed: 9,
            trees: 12,
            ..AppCfg::default()
        };
        let train = cfg.train_config();
        assert_eq!(train.seed, 9);
        assert_eq!(train.forest.seed, 9);
        assert_eq!(train.forest.n_trees, 12);
    }
}
