// lib.rs - study method advisor core
pub mod api;
pub mod common;
pub mod data;
pub mod evaluation;
pub mod features;
pub mod inference;
pub mod planning;
pub mod training;

pub use common::{AdvisorCode, AdvisorError, AdvisorResult};
pub use data::StudyMethod;
pub use inference::{RecommendRequest, Recommendation, RecommendationService};
pub use training::TrainConfig;
