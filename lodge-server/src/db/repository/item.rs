//! Item repository (central stock ledger)
//!
//! `total_quantity` is the unassigned stock on hand. Assigning stock to
//! a staff member moves quantity out of the ledger; adjusting an
//! assignment downward moves it back. The ledger never goes negative:
//! decrements are conditional updates guarded by the current quantity.

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use shared::models::{Item, ItemCreate};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, name, price, total_quantity, low_stock_threshold, created_at, updated_at";

/// Create an item. Name is unique (case-insensitive).
pub async fn create(pool: &SqlitePool, data: &ItemCreate) -> RepoResult<Item> {
    let now = now_millis();
    let result = sqlx::query_as::<_, Item>(&format!(
        "INSERT INTO item (id, name, price, total_quantity, low_stock_threshold, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
         RETURNING {COLUMNS}"
    ))
    .bind(snowflake_id())
    .bind(&data.name)
    .bind(data.price)
    .bind(data.total_quantity)
    .bind(data.low_stock_threshold)
    .bind(now)
    .fetch_one(pool)
    .await;

    result.map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Item '{}' already exists", data.name))
        }
        other => other,
    })
}

pub async fn find_all(executor: impl SqliteExecutor<'_>) -> RepoResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(&format!("SELECT {COLUMNS} FROM item ORDER BY name"))
        .fetch_all(executor)
        .await?;
    Ok(items)
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(&format!("SELECT {COLUMNS} FROM item WHERE id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(item)
}

/// Add received stock to the ledger
pub async fn receive_stock(pool: &SqlitePool, item_id: i64, quantity: i64) -> RepoResult<Item> {
    let item = sqlx::query_as::<_, Item>(&format!(
        "UPDATE item SET total_quantity = total_quantity + ?1, updated_at = ?2 \
         WHERE id = ?3 \
         RETURNING {COLUMNS}"
    ))
    .bind(quantity)
    .bind(now_millis())
    .bind(item_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Item {item_id} not found")))?;
    Ok(item)
}

/// Take `quantity` out of the ledger, failing if not enough is on hand.
///
/// The decrement is guarded by `total_quantity >= ?` in the WHERE
/// clause; a zero-row update means either a missing item or
/// insufficient stock, disambiguated with a follow-up read.
pub async fn reserve(conn: &mut SqliteConnection, item_id: i64, quantity: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE item SET total_quantity = total_quantity - ?1, updated_at = ?2 \
         WHERE id = ?3 AND total_quantity >= ?1",
    )
    .bind(quantity)
    .bind(now_millis())
    .bind(item_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if rows == 0 {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM item WHERE id = ?1")
            .bind(item_id)
            .fetch_one(&mut *conn)
            .await?;
        if exists == 0 {
            return Err(RepoError::NotFound(format!("Item {item_id} not found")));
        }
        return Err(RepoError::InsufficientStock(format!(
            "Not enough stock: requested {quantity} of item {item_id}"
        )));
    }
    Ok(())
}

/// Return `quantity` to the ledger
pub async fn release(
    executor: impl SqliteExecutor<'_>,
    item_id: i64,
    quantity: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE item SET total_quantity = total_quantity + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(quantity)
    .bind(now_millis())
    .bind(item_id)
    .execute(executor)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(RepoError::NotFound(format!("Item {item_id} not found")));
    }
    Ok(())
}
