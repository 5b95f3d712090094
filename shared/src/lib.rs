//! Shared types for the Lodge backend
//!
//! Data models, request/response DTOs and the unified API response
//! envelope used by the server and its clients.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use response::AppResponse;
pub use serde::{Deserialize, Serialize};
