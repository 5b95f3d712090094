//! Closing Balance API Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use chrono::Utc;

use shared::AppResponse;
use shared::models::{ClosingBalanceView, MonthlySalesReport};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{closing_balance, shift};
use crate::utils::time::{day_bounds, month_bounds};
use crate::utils::{AppError, AppResult, ok};

/// Staff may only see their own balances; admins see everyone's
fn require_self_or_admin(user: &CurrentUser, staff_id: i64) -> AppResult<()> {
    if !user.is_admin() && user.id != staff_id {
        return Err(AppError::forbidden(
            "Cannot access another staff member's balances",
        ));
    }
    Ok(())
}

/// POST /api/closing-balance/close-shift-balance/:shift_id (staff)
///
/// Builds (or rebuilds) the closing balance for the shift. Re-running
/// after corrections replaces the previous result.
pub async fn close_shift_balance(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(shift_id): Path<i64>,
) -> AppResult<Json<AppResponse<ClosingBalanceView>>> {
    let target = shift::find_by_id(&state.pool, shift_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shift {shift_id} not found")))?;
    require_self_or_admin(&user, target.staff_id)?;

    let balance = closing_balance::reconcile(&state.pool, shift_id).await?;
    tracing::info!(
        shift_id,
        total_sales = balance.balance.total_sales,
        "Closing balance reconciled"
    );
    Ok(ok(balance))
}

/// GET /api/closing-balance/sales/daily/:staff_id
pub async fn daily_sales(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(staff_id): Path<i64>,
) -> AppResult<Json<AppResponse<ClosingBalanceView>>> {
    require_self_or_admin(&user, staff_id)?;

    let range = day_bounds(Utc::now());
    let balance = closing_balance::find_for_staff_in_range(&state.pool, staff_id, range)
        .await?
        .ok_or_else(|| AppError::not_found("No closing balance recorded today"))?;
    Ok(ok(balance))
}

/// GET /api/closing-balance/sales/monthly/:staff_id
pub async fn monthly_sales(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(staff_id): Path<i64>,
) -> AppResult<Json<AppResponse<MonthlySalesReport>>> {
    require_self_or_admin(&user, staff_id)?;

    let range = month_bounds(Utc::now());
    let total_sales =
        closing_balance::total_for_staff_in_range(&state.pool, staff_id, range).await?;
    Ok(ok(MonthlySalesReport {
        staff_id,
        total_sales,
    }))
}
