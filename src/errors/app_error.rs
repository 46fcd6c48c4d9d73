use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::response::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("conflict")]
    Conflict,
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(reason: impl Into<String>) -> Self {
        AppError::Validation(reason.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(reason) =>
                (StatusCode::BAD_REQUEST, "VALIDATION", reason.as_str()),
            AppError::Conflict =>
                (StatusCode::CONFLICT, "CONFLICT", "already exists"),
            AppError::Database(err) => {
                error!(error = %err, "database operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "internal error")
            }
            AppError::Internal(cause) => {
                error!(cause = %cause, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "internal error")
            }
        };
        let body = ApiResponse::<()>::error(
            code.into(),
            message.into(),
        );
        (status, Json(body)).into_response()
    }
}
