use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde_json::json;
use tracing::error;

use crate::validation::FieldError;

/// API error type for HTTP responses.
///
/// Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl below
/// is the single chokepoint that shapes all failure responses, so invalid
/// input never reaches a handler body and storage failures never leak
/// driver-level detail to callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Accumulated validation-rule failures for the current request.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ApiError {
    pub fn product_not_found() -> Self {
        ApiError::NotFound("Product not found".to_string())
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Database(err) => {
                error!("storage operation failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
