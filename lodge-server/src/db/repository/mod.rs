//! Repository layer
//!
//! All SQL lives here. Handlers call repository functions and translate
//! [`RepoError`] into HTTP responses via `AppError`.
//!
//! Concurrency-sensitive updates (stock reservation, assignment
//! consumption, shift close) use conditional `UPDATE ... WHERE`
//! statements and check `rows_affected`, so invariants hold without
//! read-modify-write races.

pub mod assignment;
pub mod closing_balance;
pub mod item;
pub mod sale;
pub mod shift;
pub mod staff;

use thiserror::Error;

/// Repository error taxonomy
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    InsufficientAssignment(String),

    #[error("An active shift already exists")]
    ShiftAlreadyOpen,

    #[error("No active shift")]
    NoActiveShift,

    #[error("No sales recorded for this shift")]
    NoSalesRecorded,

    /// Transient contention (database busy / pool exhausted); retryable
    #[error("Database busy: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                RepoError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return RepoError::Duplicate(db_err.message().to_string());
                }
                let message = db_err.message().to_string();
                // SQLITE_BUSY / SQLITE_LOCKED surface as plain database
                // errors; classify them as retryable
                if message.contains("database is locked") || message.contains("database table is locked") {
                    RepoError::Unavailable(message)
                } else {
                    RepoError::Database(message)
                }
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("Record not found".to_string()),
            other => RepoError::Database(other.to_string()),
        }
    }
}
