//! Data domain: vocabularies, labelling policy and synthetic dataset generation.

pub mod domain;
pub mod policy;
pub mod service;

pub use domain::{
    Dataset, Difficulty, LearningStyle, StudyMethod, Subject, TimeAvailable, TrainingExample,
};
