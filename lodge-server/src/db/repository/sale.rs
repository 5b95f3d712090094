//! Sale repository
//!
//! Recording a sale is the hot path: it deducts from the staff
//! member's assignment, inserts the immutable sale record and bumps
//! the open shift's running total, all in one transaction. Any failed
//! step rolls the whole thing back.

use sqlx::{SqliteExecutor, SqlitePool};

use shared::models::{Sale, SaleWithItem, SaleWithStaff};
use shared::util::{now_millis, snowflake_id};

use crate::utils::MillisRange;

use super::{RepoError, RepoResult, assignment, item, shift};

/// Record a sale against the staff member's open shift.
///
/// Requires an open shift; the unit price is read from the catalog at
/// sale time and stored on the record.
pub async fn record(
    pool: &SqlitePool,
    staff_id: i64,
    item_id: i64,
    quantity: i64,
) -> RepoResult<Sale> {
    let open_shift = shift::find_open_by_staff(pool, staff_id)
        .await?
        .ok_or(RepoError::NoActiveShift)?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    assignment::consume(&mut tx, staff_id, item_id, quantity).await?;

    let item = item::find_by_id(&mut *tx, item_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {item_id} not found")))?;
    let total_amount = item.price * quantity as f64;

    let sale = sqlx::query_as::<_, Sale>(
        "INSERT INTO sale (id, staff_id, shift_id, item_id, quantity_sold, price_per_item, \
                           total_amount, sold_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
         RETURNING id, staff_id, shift_id, item_id, quantity_sold, price_per_item, \
                   total_amount, sold_at",
    )
    .bind(snowflake_id())
    .bind(staff_id)
    .bind(open_shift.id)
    .bind(item_id)
    .bind(quantity)
    .bind(item.price)
    .bind(total_amount)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    // Fails (and rolls everything back) if the shift closed between the
    // pre-check and here
    shift::bump_sales_total(&mut tx, open_shift.id, total_amount).await?;

    tx.commit().await?;
    Ok(sale)
}

/// All sales of one shift in recorded order
pub async fn find_by_shift(
    executor: impl SqliteExecutor<'_>,
    shift_id: i64,
) -> RepoResult<Vec<SaleWithItem>> {
    let sales = sqlx::query_as::<_, SaleWithItem>(
        "SELECT s.id, s.staff_id, s.shift_id, s.item_id, i.name AS item_name, \
                s.quantity_sold, s.price_per_item, s.total_amount, s.sold_at \
         FROM sale s \
         JOIN item i ON i.id = s.item_id \
         WHERE s.shift_id = ?1 \
         ORDER BY s.sold_at, s.id",
    )
    .bind(shift_id)
    .fetch_all(executor)
    .await?;
    Ok(sales)
}

/// One staff member's sales within a time range, newest first
pub async fn find_by_staff_in_range(
    executor: impl SqliteExecutor<'_>,
    staff_id: i64,
    range: MillisRange,
) -> RepoResult<Vec<SaleWithItem>> {
    let sales = sqlx::query_as::<_, SaleWithItem>(
        "SELECT s.id, s.staff_id, s.shift_id, s.item_id, i.name AS item_name, \
                s.quantity_sold, s.price_per_item, s.total_amount, s.sold_at \
         FROM sale s \
         JOIN item i ON i.id = s.item_id \
         WHERE s.staff_id = ?1 AND s.sold_at >= ?2 AND s.sold_at < ?3 \
         ORDER BY s.sold_at DESC",
    )
    .bind(staff_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_all(executor)
    .await?;
    Ok(sales)
}

/// All sales within a time range with staff context, newest first
pub async fn find_in_range(
    executor: impl SqliteExecutor<'_>,
    range: MillisRange,
) -> RepoResult<Vec<SaleWithStaff>> {
    let sales = sqlx::query_as::<_, SaleWithStaff>(
        "SELECT s.id, i.name AS item_name, st.name AS staff_name, st.email AS staff_email, \
                s.quantity_sold, s.price_per_item, s.total_amount, s.sold_at \
         FROM sale s \
         JOIN item i ON i.id = s.item_id \
         JOIN staff st ON st.id = s.staff_id \
         WHERE s.sold_at >= ?1 AND s.sold_at < ?2 \
         ORDER BY s.sold_at DESC",
    )
    .bind(range.start)
    .bind(range.end)
    .fetch_all(executor)
    .await?;
    Ok(sales)
}

/// Most recent sales across all staff
pub async fn find_recent(
    executor: impl SqliteExecutor<'_>,
    limit: i64,
) -> RepoResult<Vec<SaleWithStaff>> {
    let sales = sqlx::query_as::<_, SaleWithStaff>(
        "SELECT s.id, i.name AS item_name, st.name AS staff_name, st.email AS staff_email, \
                s.quantity_sold, s.price_per_item, s.total_amount, s.sold_at \
         FROM sale s \
         JOIN item i ON i.id = s.item_id \
         JOIN staff st ON st.id = s.staff_id \
         ORDER BY s.sold_at DESC \
         LIMIT ?1",
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(sales)
}
