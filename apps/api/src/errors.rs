use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, ApiError>`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Session token has expired")]
    Expired,

    #[error("Interview is already completed")]
    AlreadyCompleted,

    #[error("Question was not issued to this session: {0}")]
    QuestionNotIssued(String),

    #[error("Question has already been answered: {0}")]
    DuplicateAnswer(String),

    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("Question bank exhausted and no fallback available")]
    BankExhausted,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::Expired => (StatusCode::FORBIDDEN, "SESSION_EXPIRED", self.to_string()),
            ApiError::AlreadyCompleted => (
                StatusCode::FORBIDDEN,
                "ALREADY_COMPLETED",
                self.to_string(),
            ),
            ApiError::QuestionNotIssued(_) => (
                StatusCode::BAD_REQUEST,
                "QUESTION_NOT_ISSUED",
                self.to_string(),
            ),
            ApiError::DuplicateAnswer(_) => (
                StatusCode::BAD_REQUEST,
                "DUPLICATE_ANSWER",
                self.to_string(),
            ),
            ApiError::InvalidAnswer(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_ANSWER", self.to_string())
            }
            ApiError::BankExhausted => {
                tracing::error!("question bank exhausted with no usable fallback");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "BANK_EXHAUSTED",
                    self.to_string(),
                )
            }
            ApiError::Store(e) => {
                tracing::error!("store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
