//! API error responses.
//!
//! Every failure is serialized as `{"error": "..."}` with a status code
//! that distinguishes caller mistakes, missing data, incomplete enrichment,
//! and service-side failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gridcast_data::DataError;
use gridcast_model::ModelError;
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Startup artifacts failed to load
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Invalid request parameter
    #[error("{0}")]
    BadRequest(String),

    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Strategy-A enrichment left a regressor gap
    #[error("{0}")]
    IncompleteEnrichment(String),

    /// Predictor or other service-side failure
    #[error("internal error: {0}")]
    Internal(String),

    /// External table failed to load mid-request
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::MissingRegressor { .. } => ApiError::IncompleteEnrichment(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::IncompleteEnrichment(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) | ApiError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "request failed");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcast_model::parse_timestamp;

    #[test]
    fn test_missing_regressor_maps_to_incomplete_enrichment() {
        let error = ApiError::from(ModelError::MissingRegressor {
            column: "humidity".to_string(),
            ds: parse_timestamp("2018-01-01 00:00:00").unwrap(),
        });
        assert!(matches!(error, ApiError::IncompleteEnrichment(_)));
        assert!(error.to_string().contains("humidity"));
    }

    #[test]
    fn test_other_model_errors_are_internal() {
        let error = ApiError::from(ModelError::EmptyIndex);
        assert!(matches!(error, ApiError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unavailable("x".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::IncompleteEnrichment("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
