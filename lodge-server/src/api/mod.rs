//! API route modules
//!
//! One module per resource: `mod.rs` assembles the router, `handler.rs`
//! holds the axum handlers. All routes except `/health` and the auth
//! endpoints sit behind the JWT middleware; role checks happen in the
//! handlers.

pub mod assignments;
pub mod auth;
pub mod closing_balance;
pub mod health;
pub mod items;
pub mod sales;
pub mod shifts;

use crate::auth::CurrentUser;
use crate::utils::{AppError, AppResult};

/// Admin-only operations
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if !user.is_admin() {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

/// Selling-side operations (shift, sale, assignment holder)
pub fn require_staff(user: &CurrentUser) -> AppResult<()> {
    if !user.is_staff() {
        return Err(AppError::forbidden("Staff access required"));
    }
    Ok(())
}
