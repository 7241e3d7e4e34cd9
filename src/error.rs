//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::detector::DetectionError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    ValidationError(String),

    // Storage errors
    DatabaseError(String),

    // Scoring endpoint errors
    ExternalServiceError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred")
            }
            AppError::ExternalServiceError(msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Scoring service error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<DetectionError> for AppError {
    fn from(err: DetectionError) -> Self {
        match err {
            DetectionError::InvalidInput(msg) => AppError::ValidationError(msg),
            DetectionError::ScoringUnavailable(_) | DetectionError::ScoringResponseMalformed(_) => {
                AppError::ExternalServiceError(err.to_string())
            }
            DetectionError::StorageFailure(msg) => AppError::DatabaseError(msg),
        }
    }
}
