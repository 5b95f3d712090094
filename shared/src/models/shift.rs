//! Shift Model
//!
//! A bounded work session for one staff member. A shift is open while
//! `end_time` is null; at most one open shift exists per staff member.
//! Opening and closing stock snapshots are taken from the stock ledger
//! at the transition points and stored as embedded documents.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// One line of a stock snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLine {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
}

/// An expense recorded against a shift at close time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub description: String,
    pub amount: f64,
    pub added_by: i64,
    pub timestamp: i64,
}

/// Expense as submitted by the client. Entries missing a description or
/// an amount are silently dropped at close time (documented policy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub description: Option<String>,
    pub amount: Option<f64>,
}

/// Shift entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shift {
    pub id: i64,
    pub staff_id: i64,
    pub start_time: i64,
    /// Null while the shift is open
    pub end_time: Option<i64>,
    /// Full ledger snapshot taken at shift start
    pub opening_stock: Json<Vec<StockLine>>,
    /// Full ledger snapshot taken at shift close
    pub closing_stock: Option<Json<Vec<StockLine>>>,
    /// Staff attestation that the opening stock was verified
    pub confirmed_stock: bool,
    pub stock_remarks: Option<String>,
    /// Staff member the till was handed over to, if any
    pub handed_over_to: Option<i64>,
    /// Denormalized running total, bumped by each sale in the shift
    pub total_sales_amount: f64,
    pub expenses: Json<Vec<ExpenseEntry>>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Start-shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftStart {
    #[serde(default)]
    pub confirmed_stock: bool,
    pub stock_remarks: Option<String>,
}

/// Close-shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftClose {
    pub handed_over_to: Option<i64>,
    pub expenses: Option<Vec<ExpenseInput>>,
}

/// Check-shift response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftStatus {
    pub has_active_shift: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
}

/// Per-shift sales rollup for the admin overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftSalesSummary {
    pub shift_id: i64,
    pub staff_name: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub total_sales: f64,
    pub items_sold: Vec<super::SaleSummaryLine>,
}

/// Expense flattened with its shift context (admin expense report)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub description: String,
    pub amount: f64,
    pub added_by: i64,
    pub timestamp: i64,
    pub shift_id: i64,
    pub staff_id: i64,
    pub start_time: i64,
    pub end_time: Option<i64>,
}
