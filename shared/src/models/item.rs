//! Item Model
//!
//! An item's `total_quantity` is the shared stock pool: the count of
//! units not yet assigned to any staff member. It only moves through
//! the stock ledger operations (receive / reserve / release) and never
//! goes negative.

use serde::{Deserialize, Serialize};

/// Item entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    /// Unique, case-insensitive
    pub name: String,
    /// Unit sale price
    pub price: f64,
    /// Unassigned stock pool (never negative)
    pub total_quantity: i64,
    pub low_stock_threshold: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub price: f64,
    /// Initial stock received on creation
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub low_stock_threshold: i64,
}

/// Restock payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRestock {
    pub quantity: i64,
}

/// Point-in-time copy of an item embedded in sale summaries.
///
/// `price` is the unit price observed through the sale records, not the
/// live catalog price, so later price changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: i64,
    pub name: String,
    pub price: f64,
}
