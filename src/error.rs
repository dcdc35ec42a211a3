//! Crate-wide error kinds and their HTTP mapping.
//!
//! Analyzer failures never escape `processing::analyze`, which converts
//! them to a neutral default in the affected field only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Rate limit excedido para el dominio")]
    RateLimited,

    #[error("task_id inexistente")]
    NotFound,

    #[error("{0}")]
    FetchError(String),

    #[error("processing unavailable: {0}")]
    ProcessingUnavailable(String),

    #[error("framing error: {0}")]
    Framing(String),

    #[error("format error: {0}")]
    Format(String),

    #[error("Cancelled")]
    Cancelled,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::FetchError(_)
            | AppError::ProcessingUnavailable(_)
            | AppError::Framing(_)
            | AppError::Format(_)
            | AppError::Cancelled => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        (status, Json(json!({ "status": "error", "error": message }))).into_response()
    }
}
