//! HTTP error mapping
//!
//! Validation failures echo what was wrong with the input. Upstream failures are logged
//! in full but answered with a short generic message.

use super::validation::ValidationError;
use crate::error::QueryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Query(QueryError),
    Serialization(serde_json::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Query(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::Query(e) => write!(f, "Query error: {}", e),
            ApiError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::Cancelled(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Query(QueryError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Query(QueryError::Cancelled(_)) => "Error: upstream query timed out".to_string(),
            ApiError::Query(QueryError::Upstream(_)) => "Error: upstream query failed".to_string(),
            ApiError::Serialization(_) => "Error: failed to encode response".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(e) => log::warn!("⚠️  Rejected request: {}", e),
            _ => log::error!("❌ {}", self),
        }

        (self.status(), self.public_message()).into_response()
    }
}
