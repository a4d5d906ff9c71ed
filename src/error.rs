//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No updates provided.")]
    NoUpdatesProvided,

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Transient I/O error: {0}")]
    TransientIo(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Bounded pool acquisition gave up, or the pool was drained.
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => AppError::PoolExhausted,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::ConstraintViolation(db.message().to_string())
            }
            sqlx::Error::Io(e) => AppError::TransientIo(e.to_string()),
            other => AppError::Database(other),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::NoUpdatesProvided => (
                StatusCode::BAD_REQUEST,
                "no_updates_provided",
                self.to_string(),
            ),
            AppError::PoolExhausted => {
                tracing::warn!("Connection pool exhausted");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "pool_exhausted",
                    "No database connection available".to_string(),
                )
            }
            AppError::ConstraintViolation(msg) => {
                (StatusCode::CONFLICT, "constraint_violation", msg.clone())
            }
            AppError::TransientIo(msg) => {
                tracing::error!("Transient database I/O error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "transient_io",
                    "Database I/O error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "db_failure",
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
