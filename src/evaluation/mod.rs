//! Held-out evaluation of trained classifiers.

pub mod domain;
pub mod service;

pub use domain::{ClassMetrics, EvalReport};
