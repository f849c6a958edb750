//! The long-lived recommendation service.
//!
//! A service owns at most one [`TrainedModel`]. The model is built behind a
//! `OnceLock`: the first caller trains, concurrent callers block until it is
//! done, and everyone afterwards shares it read-only.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::common::error::{AdvisorError, AdvisorResult};
use crate::data::domain::StudyMethod;
use crate::planning::{plan, resources};
use crate::training::domain::{TrainConfig, TrainedModel};
use crate::training::service as training_service;

use super::domain::{RecommendRequest, Recommendation};
use super::workers::Pool;

pub struct RecommendationService {
    config: TrainConfig,
    model: OnceLock<AdvisorResult<TrainedModel>>,
    training_runs: AtomicUsize,
}

impl RecommendationService {
    /// Service that trains with `config` on first use.
    pub fn new(config: TrainConfig) -> Self {
        Self {
            config,
            model: OnceLock::new(),
            training_runs: AtomicUsize::new(0),
        }
    }

    /// Service wrapping an already trained model. It never trains.
    pub fn with_model(config: TrainConfig, model: TrainedModel) -> Self {
        Self {
            config,
            model: OnceLock::from(Ok(model)),
            training_runs: AtomicUsize::new(0),
        }
    }

    /// Train now if needed and return the model.
    ///
    /// Training runs at most once; a failure is remembered and returned on
    /// every later call.
    pub fn initialize(&self) -> AdvisorResult<&TrainedModel> {
        self.model
            .get_or_init(|| {
                self.training_runs.fetch_add(1, Ordering::SeqCst);
                info!(
                    samples = self.config.samples,
                    trees = self.config.forest.n_trees,
                    seed = self.config.seed,
                    "training model"
                );
                training_service::train(&self.config)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.model.get(), Some(Ok(_)))
    }

    /// How many times this service has started training. Never exceeds one.
    pub fn training_runs(&self) -> usize {
        self.training_runs.load(Ordering::SeqCst)
    }

    /// Predicted method name and the probability of every catalog method.
    pub fn predict(
        &self,
        request: &RecommendRequest,
    ) -> AdvisorResult<(String, BTreeMap<String, f64>)> {
        if self.model.get().is_none() {
            warn!("no trained model yet, training synchronously");
        }
        let model = self.initialize()?;

        let row = model.encoder.encode_row(
            &request.learning_style,
            &request.subject,
            &request.time_available,
            &request.difficulty,
        );
        let (code, distribution) = model.classifier.predict(&row);
        if distribution.len() != model.encoder.n_classes() {
            return Err(AdvisorError::internal(format!(
                "classifier returned {} classes, encoder knows {}",
                distribution.len(),
                model.encoder.n_classes()
            )));
        }

        let mut all_probabilities: BTreeMap<String, f64> = StudyMethod::ALL
            .iter()
            .map(|m| (m.as_str().to_string(), 0.0))
            .collect();
        for (class, p) in distribution.iter().enumerate() {
            all_probabilities.insert(model.encoder.decode_label(class)?.to_string(), *p);
        }

        let method = model.encoder.decode_label(code)?.to_string();
        Ok((method, all_probabilities))
    }

    /// Recommend a method, plan and resources for one learner.
    pub fn recommend(&self, request: &RecommendRequest) -> AdvisorResult<Recommendation> {
        let (method, all_probabilities) = self.predict(request)?;
        let confidence = all_probabilities.get(&method).copied().unwrap_or(0.0);

        let study_plan =
            plan::plan_by_name(&method, &request.time_available, &request.difficulty);
        let resources = resources::resources_by_name(&method)
            .iter()
            .map(|r| r.to_string())
            .collect();

        debug!(method = %method, confidence, "recommendation ready");
        Ok(Recommendation {
            recommended_method: method,
            confidence,
            study_plan: study_plan.lines(),
            resources,
            all_probabilities,
        })
    }
}

/// Answer many requests on `pool`; results keep the input order.
pub fn batch_recommend(
    service: &Arc<RecommendationService>,
    pool: &Pool,
    requests: Vec<RecommendRequest>,
) -> Vec<AdvisorResult<Recommendation>> {
    let total = requests.len();
    let (tx, rx) = mpsc::channel();
    for (idx, request) in requests.into_iter().enumerate() {
        let service = Arc::clone(service);
        let tx = tx.clone();
        pool.submit(move || {
            let _ = tx.send((idx, service.recommend(&request)));
        });
    }
    drop(tx);

    let mut slots: Vec<Option<AdvisorResult<Recommendation>>> = vec![None; total];
    for (idx, result) in rx {
        slots[idx] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(AdvisorError::internal("worker dropped request"))))
        .collect()
}
