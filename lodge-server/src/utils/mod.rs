//! Utility module - shared helpers and types

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, ok};
pub use result::AppResult;
pub use time::MillisRange;
