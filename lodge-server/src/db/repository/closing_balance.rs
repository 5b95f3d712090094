//! Closing balance repository
//!
//! The closing balance is a regenerable projection of a shift's sales.
//! Reconciliation recomputes the summary from the sale records and
//! upserts it keyed by shift, so re-running after late corrections
//! simply replaces the previous result.

use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

use shared::models::{ClosingBalance, ClosingBalanceView, ItemSnapshot, SaleSummaryLine, SaleWithItem};
use shared::util::{now_millis, snowflake_id};

use crate::utils::MillisRange;

use super::{RepoError, RepoResult, sale, shift, staff};

const COLUMNS: &str = "id, shift_id, staff_id, date, sales, total_sales, created_at, updated_at";

/// Collapse a shift's sales into one line per item.
///
/// Lines appear in order of each item's first sale; the unit price is
/// the one captured on the sale records, not the current catalog price.
pub fn summarize_sales(sales: &[SaleWithItem]) -> (Vec<SaleSummaryLine>, f64) {
    let mut lines: Vec<SaleSummaryLine> = Vec::new();
    let mut total = 0.0;

    for sale in sales {
        total += sale.total_amount;
        match lines.iter_mut().find(|l| l.item.id == sale.item_id) {
            Some(line) => {
                line.quantity_sold += sale.quantity_sold;
                line.total_amount += sale.total_amount;
            }
            None => lines.push(SaleSummaryLine {
                item: ItemSnapshot {
                    id: sale.item_id,
                    name: sale.item_name.clone(),
                    price: sale.price_per_item,
                },
                quantity_sold: sale.quantity_sold,
                total_amount: sale.total_amount,
            }),
        }
    }

    (lines, total)
}

/// Build (or rebuild) the closing balance for a shift.
///
/// The shift may be open or closed; shifts with no sales are rejected.
pub async fn reconcile(pool: &SqlitePool, shift_id: i64) -> RepoResult<ClosingBalanceView> {
    let shift = shift::find_by_id(pool, shift_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {shift_id} not found")))?;

    let sales = sale::find_by_shift(pool, shift_id).await?;
    if sales.is_empty() {
        return Err(RepoError::NoSalesRecorded);
    }

    let (lines, total_sales) = summarize_sales(&sales);
    let now = now_millis();

    let balance = sqlx::query_as::<_, ClosingBalance>(&format!(
        "INSERT INTO closing_balance (id, shift_id, staff_id, date, sales, total_sales, \
                                      created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) \
         ON CONFLICT(shift_id) DO UPDATE SET \
             date = excluded.date, \
             sales = excluded.sales, \
             total_sales = excluded.total_sales, \
             updated_at = excluded.updated_at \
         RETURNING {COLUMNS}"
    ))
    .bind(snowflake_id())
    .bind(shift_id)
    .bind(shift.staff_id)
    .bind(shift.start_time)
    .bind(Json(&lines))
    .bind(total_sales)
    .bind(now)
    .fetch_one(pool)
    .await?;

    with_staff_name(pool, balance).await
}

/// The staff member's closing balance whose shift started in the range
pub async fn find_for_staff_in_range(
    pool: &SqlitePool,
    staff_id: i64,
    range: MillisRange,
) -> RepoResult<Option<ClosingBalanceView>> {
    let balance = sqlx::query_as::<_, ClosingBalance>(&format!(
        "SELECT {COLUMNS} FROM closing_balance \
         WHERE staff_id = ?1 AND date >= ?2 AND date < ?3 \
         ORDER BY date DESC \
         LIMIT 1"
    ))
    .bind(staff_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_optional(pool)
    .await?;

    match balance {
        Some(balance) => Ok(Some(with_staff_name(pool, balance).await?)),
        None => Ok(None),
    }
}

/// Sum of the staff member's closing balances in the range
pub async fn total_for_staff_in_range(
    executor: impl SqliteExecutor<'_>,
    staff_id: i64,
    range: MillisRange,
) -> RepoResult<f64> {
    let total = sqlx::query_scalar::<_, Option<f64>>(
        "SELECT SUM(total_sales) FROM closing_balance \
         WHERE staff_id = ?1 AND date >= ?2 AND date < ?3",
    )
    .bind(staff_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_one(executor)
    .await?;
    Ok(total.unwrap_or(0.0))
}

async fn with_staff_name(
    pool: &SqlitePool,
    balance: ClosingBalance,
) -> RepoResult<ClosingBalanceView> {
    let staff_name = staff::find_by_id(pool, balance.staff_id)
        .await?
        .map(|s| s.name)
        .unwrap_or_else(|| "Unknown".to_string());
    Ok(ClosingBalanceView {
        balance,
        staff_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(item_id: i64, name: &str, qty: i64, price: f64, sold_at: i64) -> SaleWithItem {
        SaleWithItem {
            id: sold_at,
            staff_id: 1,
            shift_id: 1,
            item_id,
            item_name: name.to_string(),
            quantity_sold: qty,
            price_per_item: price,
            total_amount: price * qty as f64,
            sold_at,
        }
    }

    #[test]
    fn summarize_groups_by_item_in_first_sale_order() {
        let sales = vec![
            sale(2, "Cola", 2, 50.0, 100),
            sale(1, "Water", 1, 20.0, 200),
            sale(2, "Cola", 4, 50.0, 300),
        ];
        let (lines, total) = summarize_sales(&sales);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item.name, "Cola");
        assert_eq!(lines[0].quantity_sold, 6);
        assert_eq!(lines[0].total_amount, 300.0);
        assert_eq!(lines[1].item.name, "Water");
        assert_eq!(total, 320.0);
    }

    #[test]
    fn summarize_empty_is_empty() {
        let (lines, total) = summarize_sales(&[]);
        assert!(lines.is_empty());
        assert_eq!(total, 0.0);
    }
}
