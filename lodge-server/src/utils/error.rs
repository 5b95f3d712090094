//! Unified Error Handling
//!
//! Application-wide error type and its HTTP mapping. Handlers return
//! `AppResult<T>`; every error converts to the standard response
//! envelope with the status code carrying the category:
//!
//! | Category | Status |
//! |----------|--------|
//! | Invalid input, stock/assignment/shift rule violations | 400 |
//! | Missing or bad credentials | 401 |
//! | Role mismatch | 403 |
//! | Absent item/staff/shift/assignment | 404 |
//! | Duplicate name/email | 409 |
//! | Transient store contention (retryable) | 503 |
//! | Anything else | 500 |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use shared::AppResponse;

use crate::db::repository::RepoError;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    InsufficientAssignment(String),

    #[error("You already have an active shift")]
    ShiftAlreadyOpen,

    #[error("No active shift. Please start your shift first")]
    NoActiveShift,

    #[error("No sales recorded in this shift")]
    NoSalesRecorded,

    // ========== System Errors ==========
    #[error("Store temporarily unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::TokenExpired | Self::InvalidToken | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_)
            | Self::InsufficientStock(_)
            | Self::InsufficientAssignment(_)
            | Self::ShiftAlreadyOpen
            | Self::NoActiveShift
            | Self::NoSalesRecorded => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak internal detail to the client on 5xx
        let message = match &self {
            Self::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                "Database error".to_string()
            }
            Self::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(AppResponse::<()>::error(message));
        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::InsufficientStock(msg) => AppError::InsufficientStock(msg),
            RepoError::InsufficientAssignment(msg) => AppError::InsufficientAssignment(msg),
            RepoError::ShiftAlreadyOpen => AppError::ShiftAlreadyOpen,
            RepoError::NoActiveShift => AppError::NoActiveShift,
            RepoError::NoSalesRecorded => AppError::NoSalesRecorded,
            RepoError::Unavailable(msg) => AppError::Unavailable(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Create a successful response in the standard envelope
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse::success(data))
}
