//! Training pipeline: generate, encode, split, fit, evaluate.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::common::error::{AdvisorError, AdvisorResult};
use crate::data::domain::Dataset;
use crate::data::service as data_service;
use crate::evaluation::service as evaluation_service;
use crate::features::FeatureEncoder;

use super::domain::{TrainConfig, TrainedModel, Trainer};
use super::forest::ForestTrainer;

/// Train the reference random forest on a freshly generated dataset.
pub fn train(cfg: &TrainConfig) -> AdvisorResult<TrainedModel> {
    let dataset = data_service::generate(cfg.samples, cfg.seed);
    train_on(&dataset, cfg, &ForestTrainer::new(cfg.forest.clone()))
}

/// Train any [`Trainer`] on an existing dataset.
pub fn train_on<T: Trainer>(
    dataset: &Dataset,
    cfg: &TrainConfig,
    trainer: &T,
) -> AdvisorResult<TrainedModel> {
    let start = Instant::now();
    if dataset.is_empty() {
        return Err(AdvisorError::training("synthetic dataset is empty"));
    }

    let encoder = FeatureEncoder::fit(dataset);
    let (rows, labels) = encode_dataset(&encoder, dataset)?;
    let (train_idx, test_idx) = split_indices(rows.len(), cfg.test_fraction, cfg.seed)?;

    let (train_rows, train_labels) = select(&rows, &labels, &train_idx);
    let (test_rows, test_labels) = select(&rows, &labels, &test_idx);

    let classifier = trainer.fit(&train_rows, &train_labels, encoder.n_classes())?;
    let report = evaluation_service::evaluate(
        &classifier,
        train_rows.len(),
        &test_rows,
        &test_labels,
        encoder.labels(),
    );
    let fingerprint = dataset.fingerprint();

    info!(
        samples = dataset.len(),
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        accuracy = report.accuracy.unwrap_or(f64::NAN),
        fingerprint = %fingerprint,
        dur_ms = start.elapsed().as_millis() as u64,
        "model trained"
    );

    Ok(TrainedModel {
        encoder,
        classifier: Box::new(classifier),
        report,
        fingerprint,
    })
}

/// Encode every example into feature rows and label codes.
pub fn encode_dataset(
    encoder: &FeatureEncoder,
    dataset: &Dataset,
) -> AdvisorResult<(Vec<Vec<usize>>, Vec<usize>)> {
    let mut rows = Vec::with_capacity(dataset.len());
    let mut labels = Vec::with_capacity(dataset.len());
    for example in &dataset.examples {
        let [style, subject, time, difficulty] = example.feature_strs();
        rows.push(encoder.encode_row(style, subject, time, difficulty).to_vec());
        labels.push(encoder.encode_label(example.method)?);
    }
    Ok((rows, labels))
}

/// Shuffle `0..n` with `seed` and cut off `ceil(n * test_fraction)` test indices.
pub fn split_indices(
    n: usize,
    test_fraction: f64,
    seed: u64,
) -> AdvisorResult<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(AdvisorError::training(format!(
            "test fraction {test_fraction} outside [0, 1)"
        )));
    }
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test >= n {
        return Err(AdvisorError::training(format!(
            "{n} rows leave nothing to train on"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let train = indices.split_off(n_test);
    Ok((train, indices))
}

fn select(rows: &[Vec<usize>], labels: &[usize], idx: &[usize]) -> (Vec<Vec<usize>>, Vec<usize>) {
    idx.iter().map(|&i| (rows[i].clone(), labels[i])).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::domain::{Difficulty, LearningStyle, StudyMethod, Subject, TimeAvailable};
    use crate::training::domain::ForestConfig;

    fn quick_cfg() -> TrainConfig {
        TrainConfig {
            samples: 400,
            forest: ForestConfig {
                n_trees: 20,
                ..ForestConfig::default()
            },
            ..TrainConfig::default()
        }
    }

    #[test]
    fn split_is_eighty_twenty_and_disjoint() {
        let (train, test) = split_indices(1000, 0.2, 42).unwrap();
        assert_eq!(train.len(), 800);
        assert_eq!(test.len(), 200);
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn split_rounds_test_size_up() {
        let (train, test) = split_indices(11, 0.2, 1).unwrap();
        assert_eq!((train.len(), test.len()), (8, 3));
    }

    #[test]
    fn split_rejects_degenerate_inputs() {
        assert!(split_indices(1, 0.5, 1).is_err());
        assert!(split_indices(10, 1.0, 1).is_err());
        assert!(split_indices(10, -0.1, 1).is_err());
    }

    #[test]
    fn empty_dataset_is_a_training_failure() {
        let empty = Dataset {
            seed: 0,
            examples: vec![],
        };
        let err = train_on(&empty, &quick_cfg(), &ForestTrainer::default()).unwrap_err();
        assert!(matches!(err, AdvisorError::TrainingFailure(_)));
    }

    #[test]
    fn trained_model_reports_held_out_accuracy() {
        let model = train(&quick_cfg()).unwrap();
        assert_eq!(model.report.train_rows, 320);
        assert_eq!(model.report.test_rows, 80);
        let accuracy = model.report.accuracy.unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
        assert_eq!(model.classifier.n_classes(), 8);
    }

    #[test]
    fn same_config_same_model() {
        let a = train(&quick_cfg()).unwrap();
        let b = train(&quick_cfg()).unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a.report, b.report);
        let row = a.encoder.encode_row(
            LearningStyle::Kinesthetic.as_str(),
            Subject::Computing.as_str(),
            TimeAvailable::Long.as_str(),
            Difficulty::High.as_str(),
        );
        assert_eq!(a.classifier.predict(&row), b.classifier.predict(&row));
    }

    #[test]
    fn encoded_labels_decode_to_the_labelled_methods() {
        let dataset = data_service::generate(50, 3);
        let encoder = FeatureEncoder::fit(&dataset);
        let (rows, labels) = encode_dataset(&encoder, &dataset).unwrap();
        assert_eq!(rows.len(), 50);
        for (example, code) in dataset.examples.iter().zip(&labels) {
            let decoded: StudyMethod = encoder.decode_label(*code).unwrap().parse().unwrap();
            assert_eq!(decoded, example.method);
        }
    }
}
