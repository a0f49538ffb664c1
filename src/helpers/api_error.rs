use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;
use crate::models::search::QueryError;
use crate::services::search_pipeline::SearchError;

/// Failures reported back to the dashboard as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// No reference coordinate, so no search was attempted.
    #[error("{0}")]
    LocationUnresolvable(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::LocationUnresolvable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Location(e) => ApiError::LocationUnresolvable(e.to_string()),
            e @ SearchError::Places(_) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Responding with {} due to: {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::location_resolver::LocationError;

    #[test]
    fn maps_search_errors_to_status_codes() {
        let location: ApiError = SearchError::Location(LocationError::ZeroCoordinate).into();
        assert_eq!(location.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(location.to_string(), "Latitude and longitude must both be non-zero.");

        let places: ApiError = SearchError::Places("timed out".to_string()).into();
        assert_eq!(places.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(places.to_string(), "Error fetching hospitals: timed out");
    }

    #[test]
    fn query_errors_are_bad_requests() {
        let error: ApiError = QueryError::RadiusOutOfRange(50).into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
