//! Data models
//!
//! Shared between lodge-server and frontend (via API).
//! DB row types derive `sqlx::FromRow`; embedded document fields
//! (stock snapshots, expenses, sale summaries) are stored as JSON
//! text columns via `sqlx::types::Json`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod assignment;
pub mod closing_balance;
pub mod item;
pub mod sale;
pub mod shift;
pub mod staff;

// Re-exports
pub use assignment::*;
pub use closing_balance::*;
pub use item::*;
pub use sale::*;
pub use shift::*;
pub use staff::*;
