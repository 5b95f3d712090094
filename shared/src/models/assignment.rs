//! Assignment Model
//!
//! Inventory checked out from the shared stock pool to one staff member
//! for sale. At most one assignment exists per (staff, item) pair;
//! repeated assignment requests increment the existing record.

use serde::{Deserialize, Serialize};

/// Assignment entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: i64,
    pub staff_id: i64,
    pub item_id: i64,
    /// Outstanding quantity still held by the staff member (never negative)
    pub quantity_assigned: i64,
    pub assigned_at: i64,
    pub updated_at: i64,
}

/// Assign payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    pub staff_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

/// Adjust payload (admin), setting the assignment to an absolute quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentAdjust {
    pub quantity_assigned: i64,
}

/// Result of an adjustment, echoing the stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentAdjusted {
    pub old_quantity: i64,
    pub new_quantity: i64,
    /// Item stock remaining after the adjustment
    pub item_remaining: i64,
    pub assignment: Assignment,
}

/// Assignment joined with its item for list views
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AssignmentWithItem {
    pub id: i64,
    pub staff_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub item_price: f64,
    pub quantity_assigned: i64,
    pub assigned_at: i64,
}
