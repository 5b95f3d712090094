//! Assignment API Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};

use shared::AppResponse;
use shared::models::{
    AssignRequest, Assignment, AssignmentAdjust, AssignmentAdjusted, AssignmentWithItem,
};

use crate::api::{require_admin, require_staff};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{assignment, staff};
use crate::utils::validation::{validate_non_negative_quantity, validate_positive_quantity};
use crate::utils::{AppError, AppResult, ok};

/// POST /api/assignments/assign (admin)
///
/// Moves stock from the central ledger to a staff member.
pub async fn assign(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<AssignRequest>,
) -> AppResult<Json<AppResponse<Assignment>>> {
    require_admin(&user)?;
    validate_positive_quantity(data.quantity, "quantity")?;

    staff::find_by_id(&state.pool, data.staff_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", data.staff_id)))?;

    let assignment =
        assignment::assign(&state.pool, data.staff_id, data.item_id, data.quantity).await?;
    tracing::info!(
        staff_id = data.staff_id,
        item_id = data.item_id,
        quantity = data.quantity,
        "Stock assigned"
    );
    Ok(ok(assignment))
}

/// PATCH /api/assignments/:id (admin)
///
/// Sets the assignment to an absolute quantity; the difference moves
/// between the assignment and the central ledger.
pub async fn adjust(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(data): Json<AssignmentAdjust>,
) -> AppResult<Json<AppResponse<AssignmentAdjusted>>> {
    require_admin(&user)?;
    validate_non_negative_quantity(data.quantity_assigned, "quantity_assigned")?;

    let adjusted = assignment::adjust(&state.pool, id, data.quantity_assigned).await?;
    tracing::info!(
        assignment_id = id,
        old = adjusted.old_quantity,
        new = adjusted.new_quantity,
        "Assignment adjusted"
    );
    Ok(ok(adjusted))
}

/// GET /api/assignments/my-items (staff)
pub async fn my_items(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<AssignmentWithItem>>>> {
    require_staff(&user)?;
    let assignments = assignment::find_by_staff_with_items(&state.pool, user.id).await?;
    Ok(ok(assignments))
}

/// GET /api/assignments/staff/:staff_id (admin)
pub async fn staff_assignments(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(staff_id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<AssignmentWithItem>>>> {
    require_admin(&user)?;
    staff::find_by_id(&state.pool, staff_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {staff_id} not found")))?;
    let assignments = assignment::find_by_staff_with_items(&state.pool, staff_id).await?;
    Ok(ok(assignments))
}
