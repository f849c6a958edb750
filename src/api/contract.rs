//! JSON request/response envelope for delivery layers.
//!
//! Every call produces a JSON object with a `success` flag. Successful
//! responses carry the recommendation fields inline; failures carry `error`.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::common::error::{AdvisorError, AdvisorResult};
use crate::inference::domain::{RecommendRequest, Recommendation};
use crate::inference::service::{self as inference_service, RecommendationService};
use crate::inference::workers::Pool;

/// Returned if serialising a response ever fails.
const FALLBACK_JSON: &str = r#"{"success":false,"error":"internal error: response serialisation failed"}"#;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(flatten)]
    pub recommendation: Option<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<AdvisorResult<Recommendation>> for ApiResponse {
    fn from(result: AdvisorResult<Recommendation>) -> Self {
        match result {
            Ok(recommendation) => Self {
                success: true,
                recommendation: Some(recommendation),
                error: None,
            },
            Err(err) => {
                warn!(code = err.code() as u32, %err, "recommend failed");
                Self {
                    success: false,
                    recommendation: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

impl ApiResponse {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| FALLBACK_JSON.to_string())
    }
}

/// Parse a single request object.
pub fn parse_request(raw: &str) -> AdvisorResult<RecommendRequest> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| AdvisorError::malformed(e.to_string()))?;
    request_from_value(value)
}

/// Only objects are requests. Derived struct impls would also take a positional array.
fn request_from_value(value: serde_json::Value) -> AdvisorResult<RecommendRequest> {
    if !value.is_object() {
        return Err(AdvisorError::malformed("request must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| AdvisorError::malformed(e.to_string()))
}

/// Typed Recommend wrapped in the envelope.
pub fn handle(service: &RecommendationService, request: &RecommendRequest) -> ApiResponse {
    service.recommend(request).into()
}

/// JSON in, JSON out. Never panics and never returns a bare error.
pub fn handle_json(service: &RecommendationService, raw: &str) -> String {
    let result = parse_request(raw).and_then(|request| service.recommend(&request));
    ApiResponse::from(result).to_json()
}

/// JSON array of requests in, JSON array of envelopes out, fanned out on `pool`.
///
/// An unparseable body yields a single failure envelope instead of an array.
pub fn handle_json_batch(service: &Arc<RecommendationService>, pool: &Pool, raw: &str) -> String {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => return ApiResponse::from(Err(AdvisorError::malformed(e.to_string()))).to_json(),
    };

    let mut parsed = Vec::with_capacity(values.len());
    let mut requests = Vec::new();
    for value in values {
        match request_from_value(value) {
            Ok(request) => {
                parsed.push(None);
                requests.push(request);
            }
            Err(err) => parsed.push(Some(err)),
        }
    }

    let mut answers = inference_service::batch_recommend(service, pool, requests).into_iter();
    let responses: Vec<ApiResponse> = parsed
        .into_iter()
        .map(|failure| match failure {
            Some(err) => ApiResponse::from(Err(err)),
            None => ApiResponse::from(
                answers
                    .next()
                    .unwrap_or_else(|| Err(AdvisorError::internal("missing batch answer"))),
            ),
        })
        .collect();

    serde_json::to_string(&responses).unwrap_or_else(|_| FALLBACK_JSON.to_string())
}
