//! Error handling primitives shared across the core.
//!
//! Every variant carries a stable numeric code so the C boundary can report
//! failures without marshalling strings.

use thiserror::Error;

/// Stable error codes that cross the FFI boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AdvisorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Categorical value never seen while fitting the encoder.
    UnknownFeatureValue = 1,
    /// Code outside the fitted range of an encoder.
    UnknownValue = 2,
    /// Method name absent from the catalog.
    UnknownMethod = 3,
    /// Request is missing fields or has the wrong shape.
    MalformedRequest = 4,
    /// Model fit failed.
    TrainingFailure = 5,
    /// Catch-all for bugs.
    Internal = 6,
}

/// Canonical error type for the core.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AdvisorError {
    #[error("unknown value {value:?} for feature {feature}")]
    UnknownFeatureValue { feature: &'static str, value: String },

    #[error("code {code} is outside the fitted range of {feature}")]
    UnknownValue { feature: &'static str, code: usize },

    #[error("unknown study method {0:?}")]
    UnknownMethod(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("training failed: {0}")]
    TrainingFailure(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

impl AdvisorError {
    /// Machine parsable code for this error.
    pub fn code(&self) -> AdvisorCode {
        match self {
            AdvisorError::UnknownFeatureValue { .. } => AdvisorCode::UnknownFeatureValue,
            AdvisorError::UnknownValue { .. } => AdvisorCode::UnknownValue,
            AdvisorError::UnknownMethod(_) => AdvisorCode::UnknownMethod,
            AdvisorError::MalformedRequest(_) => AdvisorCode::MalformedRequest,
            AdvisorError::TrainingFailure(_) => AdvisorCode::TrainingFailure,
            AdvisorError::Internal(_) => AdvisorCode::Internal,
        }
    }

    /// Validation helper.
    pub fn malformed(reason: impl Into<String>) -> Self {
        AdvisorError::MalformedRequest(reason.into())
    }

    /// Training helper.
    pub fn training(reason: impl Into<String>) -> Self {
        AdvisorError::TrainingFailure(reason.into())
    }

    /// Internal error helper.
    pub fn internal(reason: impl Into<String>) -> Self {
        AdvisorError::Internal(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AdvisorCode::Ok as u32, 0);
        assert_eq!(AdvisorCode::UnknownFeatureValue as u32, 1);
        assert_eq!(AdvisorCode::UnknownValue as u32, 2);
        assert_eq!(AdvisorCode::UnknownMethod as u32, 3);
        assert_eq!(AdvisorCode::MalformedRequest as u32, 4);
        assert_eq!(AdvisorCode::TrainingFailure as u32, 5);
        assert_eq!(AdvisorCode::Internal as u32, 6);
    }

    #[test]
    fn variants_map_to_their_codes() {
        assert_eq!(
            AdvisorError::malformed("missing subject").code(),
            AdvisorCode::MalformedRequest
        );
        assert_eq!(
            AdvisorError::training("empty dataset").code(),
            AdvisorCode::TrainingFailure
        );
        assert_eq!(
            AdvisorError::UnknownValue {
                feature: "subject",
                code: 99
            }
            .code(),
            AdvisorCode::UnknownValue
        );
    }

    #[test]
    fn display_includes_reason() {
        let err = AdvisorError::malformed("missing field `subject`");
        assert_eq!(
            err.to_string(),
            "malformed request: missing field `subject`"
        );
    }
}
