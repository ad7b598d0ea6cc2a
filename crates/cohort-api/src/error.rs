//! Error types for the Cohort API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cohort_core::CoreError;

/// Body message returned when a query runs before any ingestion.
pub const EMPTY_STORE_MESSAGE: &str = "Nenhuma pessoa em cache";

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A store or aggregation error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be decoded into the expected records.
    #[error("invalid request body: {0}")]
    UnprocessableBody(String),

    /// A query string could not be decoded.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::Validation { .. }) | Self::UnprocessableBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Core(CoreError::EmptyStore) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::InvalidParameter(_)) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Core(CoreError::EmptyStore) => EMPTY_STORE_MESSAGE.to_owned(),
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
