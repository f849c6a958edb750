//! Feature encoding between categorical strings and classifier codes.

pub mod encoder;

pub use encoder::{CodeTable, Feature, FeatureEncoder, FALLBACK_CODE};
