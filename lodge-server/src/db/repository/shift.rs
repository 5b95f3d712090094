//! Shift repository
//!
//! A shift is open while `end_time` is null. The partial unique index
//! on (staff_id) WHERE end_time IS NULL makes "one open shift per
//! staff member" hold even under concurrent start requests; closing
//! uses a conditional update so double-close is impossible.

use sqlx::types::Json;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use shared::models::{ExpenseEntry, Shift, ShiftClose, ShiftStart, StockLine};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult, item};

const COLUMNS: &str = "id, staff_id, start_time, end_time, opening_stock, closing_stock, \
     confirmed_stock, stock_remarks, handed_over_to, total_sales_amount, expenses, \
     created_at, updated_at";

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Shift>> {
    let shift = sqlx::query_as::<_, Shift>(&format!("SELECT {COLUMNS} FROM shift WHERE id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(shift)
}

/// The staff member's open shift, if any
pub async fn find_open_by_staff(
    executor: impl SqliteExecutor<'_>,
    staff_id: i64,
) -> RepoResult<Option<Shift>> {
    let shift = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {COLUMNS} FROM shift WHERE staff_id = ?1 AND end_time IS NULL"
    ))
    .bind(staff_id)
    .fetch_optional(executor)
    .await?;
    Ok(shift)
}

/// Open a new shift, snapshotting the full stock ledger.
///
/// Snapshot and insert share one transaction so the opening stock is
/// consistent with the moment the shift began.
pub async fn start(pool: &SqlitePool, staff_id: i64, data: &ShiftStart) -> RepoResult<Shift> {
    if find_open_by_staff(pool, staff_id).await?.is_some() {
        return Err(RepoError::ShiftAlreadyOpen);
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let snapshot = ledger_snapshot(&mut tx).await?;

    let result = sqlx::query_as::<_, Shift>(&format!(
        "INSERT INTO shift (id, staff_id, start_time, end_time, opening_stock, confirmed_stock, \
                            stock_remarks, total_sales_amount, expenses, created_at, updated_at) \
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, 0, '[]', ?3, ?3) \
         RETURNING {COLUMNS}"
    ))
    .bind(snowflake_id())
    .bind(staff_id)
    .bind(now)
    .bind(Json(&snapshot))
    .bind(data.confirmed_stock)
    .bind(data.stock_remarks.as_deref())
    .fetch_one(&mut *tx)
    .await;

    // A concurrent start slips past the pre-check but trips the partial
    // unique index on open shifts
    let shift = result.map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::ShiftAlreadyOpen,
        other => other,
    })?;

    tx.commit().await?;
    Ok(shift)
}

/// Close the staff member's open shift.
///
/// Appends well-formed expenses, snapshots closing stock and stamps
/// `end_time`. The update is conditional on `end_time IS NULL`.
pub async fn close(pool: &SqlitePool, staff_id: i64, data: &ShiftClose) -> RepoResult<Shift> {
    let open = find_open_by_staff(pool, staff_id)
        .await?
        .ok_or(RepoError::NoActiveShift)?;

    let now = now_millis();
    let mut expenses = open.expenses.0.clone();
    for entry in data.expenses.clone().unwrap_or_default() {
        // Entries missing a description or an amount are dropped
        if let (Some(description), Some(amount)) = (entry.description, entry.amount) {
            expenses.push(ExpenseEntry {
                description,
                amount,
                added_by: staff_id,
                timestamp: now,
            });
        }
    }

    let mut tx = pool.begin().await?;
    let snapshot = ledger_snapshot(&mut tx).await?;

    let rows = sqlx::query(
        "UPDATE shift SET end_time = ?1, expenses = ?2, closing_stock = ?3, \
                          handed_over_to = COALESCE(?4, handed_over_to), updated_at = ?1 \
         WHERE id = ?5 AND end_time IS NULL",
    )
    .bind(now)
    .bind(Json(&expenses))
    .bind(Json(&snapshot))
    .bind(data.handed_over_to)
    .bind(open.id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(RepoError::NoActiveShift);
    }
    tx.commit().await?;

    find_by_id(pool, open.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", open.id)))
}

/// Bump the shift's denormalized sales total. Zero rows affected means
/// the shift was closed concurrently.
pub async fn bump_sales_total(
    conn: &mut SqliteConnection,
    shift_id: i64,
    amount: f64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE shift SET total_sales_amount = total_sales_amount + ?1, updated_at = ?2 \
         WHERE id = ?3 AND end_time IS NULL",
    )
    .bind(amount)
    .bind(now_millis())
    .bind(shift_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(RepoError::NoActiveShift);
    }
    Ok(())
}

/// All shifts, newest first
pub async fn find_all(executor: impl SqliteExecutor<'_>) -> RepoResult<Vec<Shift>> {
    let shifts =
        sqlx::query_as::<_, Shift>(&format!("SELECT {COLUMNS} FROM shift ORDER BY start_time DESC"))
            .fetch_all(executor)
            .await?;
    Ok(shifts)
}

/// Shifts that recorded at least one expense, newest first
pub async fn find_with_expenses(executor: impl SqliteExecutor<'_>) -> RepoResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {COLUMNS} FROM shift WHERE expenses != '[]' ORDER BY start_time DESC"
    ))
    .fetch_all(executor)
    .await?;
    Ok(shifts)
}

async fn ledger_snapshot(conn: &mut SqliteConnection) -> RepoResult<Vec<StockLine>> {
    let items = item::find_all(&mut *conn).await?;
    Ok(items
        .into_iter()
        .map(|i| StockLine {
            item_id: i.id,
            item_name: i.name,
            quantity: i.total_quantity,
        })
        .collect())
}
