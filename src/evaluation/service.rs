//! Metric computation over the held-out split.

use crate::inference::domain::Classifier;

use super::domain::{ClassMetrics, EvalReport};

/// Score `classifier` on held-out rows. `labels` names each class code.
pub fn evaluate(
    classifier: &dyn Classifier,
    train_rows: usize,
    rows: &[Vec<usize>],
    expected: &[usize],
    labels: &[String],
) -> EvalReport {
    let mut per_class: Vec<ClassMetrics> = labels
        .iter()
        .map(|label| ClassMetrics {
            label: label.clone(),
            support: 0,
            correct: 0,
        })
        .collect();

    let mut correct = 0;
    for (row, &truth) in rows.iter().zip(expected) {
        let (predicted, _) = classifier.predict(row);
        let hit = predicted == truth;
        if hit {
            correct += 1;
        }
        if let Some(metrics) = per_class.get_mut(truth) {
            metrics.support += 1;
            if hit {
                metrics.correct += 1;
            }
        }
    }

    let test_rows = rows.len().min(expected.len());
    EvalReport {
        train_rows,
        test_rows,
        accuracy: (test_rows > 0).then(|| correct as f64 / test_rows as f64),
        per_class,
    }
}
