//! Sale Model
//!
//! Sales are immutable once created; corrections happen by compensating
//! records, not edits. `price_per_item` is captured at sale time and is
//! never re-read from the catalog.

use serde::{Deserialize, Serialize};

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub staff_id: i64,
    /// The shift that was open when the sale was recorded
    pub shift_id: i64,
    pub item_id: i64,
    pub quantity_sold: i64,
    /// Unit price at sale time
    pub price_per_item: f64,
    /// quantity_sold * price_per_item
    pub total_amount: f64,
    pub sold_at: i64,
}

/// Sell payload (staff)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellRequest {
    pub item_id: i64,
    pub quantity: i64,
}

/// Sale joined with its item name for list views and summaries
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleWithItem {
    pub id: i64,
    pub staff_id: i64,
    pub shift_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub quantity_sold: i64,
    pub price_per_item: f64,
    pub total_amount: f64,
    pub sold_at: i64,
}

/// Sale joined with item and staff names (admin views)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleWithStaff {
    pub id: i64,
    pub item_name: String,
    pub staff_name: String,
    pub staff_email: String,
    pub quantity_sold: i64,
    pub price_per_item: f64,
    pub total_amount: f64,
    pub sold_at: i64,
}

/// Admin rollup of a day's sales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySalesReport {
    pub total_sales_value: f64,
    pub sales: Vec<SaleWithStaff>,
}
