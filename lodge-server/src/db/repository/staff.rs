//! Staff repository

use sqlx::{SqliteExecutor, SqlitePool};

use shared::models::{Staff, StaffRole};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, name, email, role, password_hash, created_at";

/// Create a staff account. Email is unique (case-insensitive).
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    role: StaffRole,
    password_hash: &str,
) -> RepoResult<Staff> {
    let result = sqlx::query_as::<_, Staff>(
        "INSERT INTO staff (id, name, email, role, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         RETURNING id, name, email, role, password_hash, created_at",
    )
    .bind(snowflake_id())
    .bind(name)
    .bind(email)
    .bind(role)
    .bind(password_hash)
    .bind(now_millis())
    .fetch_one(pool)
    .await;

    result.map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate("Email already registered".to_string()),
        other => other,
    })
}

pub async fn find_by_email(
    executor: impl SqliteExecutor<'_>,
    email: &str,
) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!(
        "SELECT {COLUMNS} FROM staff WHERE email = ?1 COLLATE NOCASE"
    ))
    .bind(email)
    .fetch_optional(executor)
    .await?;
    Ok(staff)
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!("SELECT {COLUMNS} FROM staff WHERE id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(staff)
}

/// Number of registered accounts. Used to bootstrap the first admin.
pub async fn count(executor: impl SqliteExecutor<'_>) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM staff")
        .fetch_one(executor)
        .await?;
    Ok(count)
}
