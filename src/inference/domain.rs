//! Domain definitions for recommendation requests and the classifier contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Black-box probabilistic classifier over encoded rows.
pub trait Classifier: Send + Sync {
    /// Width of every distribution this classifier returns.
    fn n_classes(&self) -> usize;

    /// Probability per class code; sums to 1.0.
    fn predict_proba(&self, row: &[usize]) -> Vec<f64>;

    /// Most probable class code and the full distribution. Ties go to the lowest code.
    fn predict(&self, row: &[usize]) -> (usize, Vec<f64>) {
        let proba = self.predict_proba(row);
        (argmax(&proba), proba)
    }
}

/// Index of the largest value, first one on ties. Empty input yields 0.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// The four raw answers a learner gives.
///
/// Values outside the known vocabularies are accepted and encoded with the
/// fallback code.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub learning_style: String,
    pub subject: String,
    pub time_available: String,
    pub difficulty: String,
}

impl RecommendRequest {
    pub fn new(
        learning_style: impl Into<String>,
        subject: impl Into<String>,
        time_available: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            learning_style: learning_style.into(),
            subject: subject.into(),
            time_available: time_available.into(),
            difficulty: difficulty.into(),
        }
    }
}

/// Result of a single Recommend call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_method: String,
    /// Probability of `recommended_method`.
    pub confidence: f64,
    pub study_plan: Vec<String>,
    pub resources: Vec<String>,
    /// One entry per catalog method, sorted by name.
    pub all_probabilities: BTreeMap<String, f64>,
}
