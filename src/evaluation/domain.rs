//! Held-out evaluation results.
//!
//! Reports are diagnostics only; nothing refuses a model because of them.

use serde::Serialize;

/// Per-class hit rate on the held-out rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    /// Held-out rows carrying this label.
    pub support: usize,
    /// Of those, rows predicted correctly.
    pub correct: usize,
}

impl ClassMetrics {
    pub fn recall(&self) -> Option<f64> {
        (self.support > 0).then(|| self.correct as f64 / self.support as f64)
    }
}

/// Summary of a model's performance on the held-out split.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvalReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// `None` when the held-out split is empty.
    pub accuracy: Option<f64>,
    pub per_class: Vec<ClassMetrics>,
}

impl EvalReport {
    /// Compact JSON card for logs and hosts.
    pub fn metrics_card(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
