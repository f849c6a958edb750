//! Domain types for model training.

use std::fmt;

use crate::common::error::AdvisorResult;
use crate::evaluation::domain::EvalReport;
use crate::features::FeatureEncoder;
use crate::inference::domain::Classifier;

/// Hyperparameters of the random forest.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// Features searched per node; `None` means ⌊√n_features⌋.
    pub max_features: Option<usize>,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_features: None,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// Effective per-node feature budget for `n_features` columns.
    pub fn features_per_node(&self, n_features: usize) -> usize {
        let wanted = self
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().floor() as usize);
        wanted.clamp(1, n_features.max(1))
    }
}

/// End-to-end training parameters: dataset size, split and forest.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    pub samples: usize,
    /// Seeds both the generator and the train/test shuffle.
    pub seed: u64,
    pub test_fraction: f64,
    pub forest: ForestConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            samples: crate::data::service::DEFAULT_SAMPLES,
            seed: 42,
            test_fraction: 0.2,
            forest: ForestConfig::default(),
        }
    }
}

/// Interface for components that can fit a classifier on encoded rows.
pub trait Trainer {
    type Model: Classifier + 'static;

    fn fit(
        &self,
        rows: &[Vec<usize>],
        labels: &[usize],
        n_classes: usize,
    ) -> AdvisorResult<Self::Model>;
}

/// Everything inference needs, frozen after training.
pub struct TrainedModel {
    pub encoder: FeatureEncoder,
    pub classifier: Box<dyn Classifier>,
    pub report: EvalReport,
    /// Fingerprint of the dataset the model was fitted on.
    pub fingerprint: String,
}

impl fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainedModel")
            .field("n_classes", &self.classifier.n_classes())
            .field("report", &self.report)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_feature_budget_is_sqrt() {
        let cfg = ForestConfig::default();
        assert_eq!(cfg.features_per_node(4), 2);
        assert_eq!(cfg.features_per_node(9), 3);
        assert_eq!(cfg.features_per_node(1), 1);
    }

    #[test]
    fn explicit_feature_budget_is_clamped() {
        let cfg = ForestConfig {
            max_features: Some(10),
            ..ForestConfig::default()
        };
        assert_eq!(cfg.features_per_node(4), 4);
        let cfg = ForestConfig {
            max_features: Some(0),
            ..ForestConfig::default()
        };
        assert_eq!(cfg.features_per_node(4), 1);
    }
}
