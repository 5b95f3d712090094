//! Assignment repository
//!
//! Tracks how much of each item a staff member currently holds. The
//! pair (staff_id, item_id) is unique; assigning the same item again
//! increments the existing row. Sales consume from assignments, never
//! from the central ledger directly.

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use shared::models::{Assignment, AssignmentAdjusted, AssignmentWithItem};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult, item};

const COLUMNS: &str = "id, staff_id, item_id, quantity_assigned, assigned_at, updated_at";

/// Assign stock to a staff member, moving it out of the central ledger.
///
/// Ledger decrement and assignment upsert happen in one transaction, so
/// stock is never double-counted.
pub async fn assign(
    pool: &SqlitePool,
    staff_id: i64,
    item_id: i64,
    quantity: i64,
) -> RepoResult<Assignment> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    item::reserve(&mut tx, item_id, quantity).await?;

    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignment (id, staff_id, item_id, quantity_assigned, assigned_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(staff_id, item_id) DO UPDATE SET \
             quantity_assigned = quantity_assigned + excluded.quantity_assigned, \
             updated_at = excluded.updated_at \
         RETURNING {COLUMNS}"
    ))
    .bind(snowflake_id())
    .bind(staff_id)
    .bind(item_id)
    .bind(quantity)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(assignment)
}

/// Set an assignment to an absolute quantity, reconciling the ledger.
///
/// Increasing the assignment reserves the difference from the ledger;
/// decreasing it releases the difference back.
pub async fn adjust(
    pool: &SqlitePool,
    assignment_id: i64,
    new_quantity: i64,
) -> RepoResult<AssignmentAdjusted> {
    let mut tx = pool.begin().await?;

    let current = find_by_id(&mut *tx, assignment_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Assignment {assignment_id} not found")))?;

    let diff = new_quantity - current.quantity_assigned;
    if diff > 0 {
        item::reserve(&mut tx, current.item_id, diff).await?;
    } else if diff < 0 {
        item::release(&mut *tx, current.item_id, -diff).await?;
    }

    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "UPDATE assignment SET quantity_assigned = ?1, updated_at = ?2 \
         WHERE id = ?3 \
         RETURNING {COLUMNS}"
    ))
    .bind(new_quantity)
    .bind(now_millis())
    .bind(assignment_id)
    .fetch_one(&mut *tx)
    .await?;

    let item = item::find_by_id(&mut *tx, current.item_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", current.item_id)))?;

    tx.commit().await?;

    Ok(AssignmentAdjusted {
        old_quantity: current.quantity_assigned,
        new_quantity,
        item_remaining: item.total_quantity,
        assignment,
    })
}

/// Deduct a sold quantity from the staff member's assignment.
///
/// Guarded decrement; a zero-row update means either no assignment for
/// this (staff, item) pair or not enough assigned quantity left.
pub async fn consume(
    conn: &mut SqliteConnection,
    staff_id: i64,
    item_id: i64,
    quantity: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE assignment SET quantity_assigned = quantity_assigned - ?1, updated_at = ?2 \
         WHERE staff_id = ?3 AND item_id = ?4 AND quantity_assigned >= ?1",
    )
    .bind(quantity)
    .bind(now_millis())
    .bind(staff_id)
    .bind(item_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if rows == 0 {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM assignment WHERE staff_id = ?1 AND item_id = ?2",
        )
        .bind(staff_id)
        .bind(item_id)
        .fetch_one(&mut *conn)
        .await?;
        if exists == 0 {
            return Err(RepoError::NotFound(format!(
                "No assignment of item {item_id} for this staff member"
            )));
        }
        return Err(RepoError::InsufficientAssignment(format!(
            "Not enough assigned quantity: requested {quantity} of item {item_id}"
        )));
    }
    Ok(())
}

pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Assignment>> {
    let assignment =
        sqlx::query_as::<_, Assignment>(&format!("SELECT {COLUMNS} FROM assignment WHERE id = ?1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
    Ok(assignment)
}

/// All assignments for a staff member, joined with item details
pub async fn find_by_staff_with_items(
    executor: impl SqliteExecutor<'_>,
    staff_id: i64,
) -> RepoResult<Vec<AssignmentWithItem>> {
    let assignments = sqlx::query_as::<_, AssignmentWithItem>(
        "SELECT a.id, a.staff_id, a.item_id, a.quantity_assigned, a.assigned_at, \
                i.name AS item_name, i.price AS item_price \
         FROM assignment a \
         JOIN item i ON i.id = a.item_id \
         WHERE a.staff_id = ?1 \
         ORDER BY i.name",
    )
    .bind(staff_id)
    .fetch_all(executor)
    .await?;
    Ok(assignments)
}
