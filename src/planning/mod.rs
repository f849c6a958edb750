//! Turning a chosen method into something a learner can act on.

pub mod plan;
pub mod resources;

pub use plan::{Activity, StudyPlan};
