//! Shift API Handlers

use axum::Json;
use axum::extract::{Extension, Query, State};
use chrono::Utc;
use serde::Deserialize;

use shared::AppResponse;
use shared::models::{ExpenseRecord, Shift, ShiftClose, ShiftSalesSummary, ShiftStart, ShiftStatus};

use crate::api::{require_admin, require_staff};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{closing_balance, sale, shift, staff};
use crate::utils::time::{MillisRange, day_bounds, month_bounds};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

/// POST /api/shifts/start-shift (staff)
pub async fn start_shift(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<ShiftStart>,
) -> AppResult<Json<AppResponse<Shift>>> {
    require_staff(&user)?;
    validate_optional_text(&data.stock_remarks, "stock_remarks", MAX_NOTE_LEN)?;

    let shift = shift::start(&state.pool, user.id, &data).await?;
    tracing::info!(shift_id = shift.id, staff_id = user.id, "Shift started");
    Ok(ok(shift))
}

/// POST /api/shifts/close-shift (staff)
pub async fn close_shift(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<ShiftClose>,
) -> AppResult<Json<AppResponse<Shift>>> {
    require_staff(&user)?;

    // Well-formed expense entries must carry sane values; entries with
    // missing fields are dropped later, not rejected
    for entry in data.expenses.iter().flatten() {
        if let Some(description) = &entry.description {
            validate_required_text(description, "expense description", MAX_NOTE_LEN)?;
        }
        if let Some(amount) = entry.amount {
            validate_amount(amount, "expense amount")?;
        }
    }

    if let Some(handed_over_to) = data.handed_over_to {
        staff::find_by_id(&state.pool, handed_over_to)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff {handed_over_to} not found")))?;
    }

    let shift = shift::close(&state.pool, user.id, &data).await?;
    tracing::info!(
        shift_id = shift.id,
        staff_id = user.id,
        total_sales = shift.total_sales_amount,
        "Shift closed"
    );
    Ok(ok(shift))
}

/// GET /api/shifts/check-shift (staff)
pub async fn check_shift(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<ShiftStatus>>> {
    require_staff(&user)?;
    let shift = shift::find_open_by_staff(&state.pool, user.id).await?;
    Ok(ok(ShiftStatus {
        has_active_shift: shift.is_some(),
        shift,
    }))
}

/// GET /api/shifts/sales-per-shift (admin)
///
/// Every shift with its per-item sales rollup, newest first.
pub async fn sales_per_shift(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<ShiftSalesSummary>>>> {
    require_admin(&user)?;

    let shifts = shift::find_all(&state.pool).await?;
    let mut summaries = Vec::with_capacity(shifts.len());
    for s in shifts {
        let sales = sale::find_by_shift(&state.pool, s.id).await?;
        let (items_sold, total_sales) = closing_balance::summarize_sales(&sales);
        let staff_name = staff::find_by_id(&state.pool, s.staff_id)
            .await?
            .map(|st| st.name)
            .unwrap_or_else(|| "Unknown".to_string());
        summaries.push(ShiftSalesSummary {
            shift_id: s.id,
            staff_name,
            start_time: s.start_time,
            end_time: s.end_time,
            total_sales,
            items_sold,
        });
    }
    Ok(ok(summaries))
}

/// Expense report window
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    /// `today` or `month`; absent means all time
    pub filter: Option<String>,
}

/// GET /api/shifts/expenses (admin)
///
/// All expenses recorded across shifts, flattened with shift context.
pub async fn expenses(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ExpenseQuery>,
) -> AppResult<Json<AppResponse<Vec<ExpenseRecord>>>> {
    require_admin(&user)?;

    let range: Option<MillisRange> = match query.filter.as_deref() {
        Some("today") => Some(day_bounds(Utc::now())),
        Some("month") => Some(month_bounds(Utc::now())),
        Some(other) => {
            return Err(AppError::validation(format!(
                "filter must be 'today' or 'month', got '{other}'"
            )));
        }
        None => None,
    };

    let shifts = shift::find_with_expenses(&state.pool).await?;
    let mut records = Vec::new();
    for s in shifts {
        for entry in s.expenses.0.iter() {
            if let Some(range) = range
                && !(range.start <= entry.timestamp && entry.timestamp < range.end)
            {
                continue;
            }
            records.push(ExpenseRecord {
                description: entry.description.clone(),
                amount: entry.amount,
                added_by: entry.added_by,
                timestamp: entry.timestamp,
                shift_id: s.id,
                staff_id: s.staff_id,
                start_time: s.start_time,
                end_time: s.end_time,
            });
        }
    }
    Ok(ok(records))
}
