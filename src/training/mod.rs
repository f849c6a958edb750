//! Training domain: the random forest and the pipeline that fits it.

pub mod domain;
pub mod forest;
pub mod service;

pub use domain::{ForestConfig, TrainConfig, TrainedModel, Trainer};
pub use forest::{ForestTrainer, RandomForest};
