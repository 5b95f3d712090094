//! Closing Balance Model
//!
//! A derived, regenerable projection: one record per shift summarizing
//! every sale tied to it. Reconciliation replaces the record wholesale,
//! so re-running it is idempotent.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::ItemSnapshot;

/// One summary line: all sales of a single item within the shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSummaryLine {
    pub item: ItemSnapshot,
    pub quantity_sold: i64,
    pub total_amount: f64,
}

/// Closing balance entity (unique per shift)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClosingBalance {
    pub id: i64,
    pub shift_id: i64,
    pub staff_id: i64,
    /// The shift's start time
    pub date: i64,
    pub sales: Json<Vec<SaleSummaryLine>>,
    /// Sum of all summary lines' total_amount
    pub total_sales: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Closing balance with the staff name resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingBalanceView {
    #[serde(flatten)]
    pub balance: ClosingBalance,
    pub staff_name: String,
}

/// Monthly sales rollup for one staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySalesReport {
    pub staff_id: i64,
    pub total_sales: f64,
}
