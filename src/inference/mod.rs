//! Inference domain: the classifier contract and the recommendation service.

pub mod domain;
pub mod service;
pub mod workers;

pub use domain::{Classifier, RecommendRequest, Recommendation};
pub use service::RecommendationService;
