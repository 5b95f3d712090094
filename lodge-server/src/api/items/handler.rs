//! Item API Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};

use shared::AppResponse;
use shared::models::{Item, ItemCreate, ItemRestock};

use crate::api::require_admin;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::item;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_amount, validate_non_negative_quantity, validate_positive_quantity,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

/// POST /api/items (admin)
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<ItemCreate>,
) -> AppResult<Json<AppResponse<Item>>> {
    require_admin(&user)?;
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_amount(data.price, "price")?;
    validate_non_negative_quantity(data.total_quantity, "total_quantity")?;
    validate_non_negative_quantity(data.low_stock_threshold, "low_stock_threshold")?;

    let item = item::create(&state.pool, &data).await?;
    tracing::info!(item_id = item.id, name = %item.name, "Item created");
    Ok(ok(item))
}

/// POST /api/items/:id/restock (admin)
pub async fn restock(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(data): Json<ItemRestock>,
) -> AppResult<Json<AppResponse<Item>>> {
    require_admin(&user)?;
    validate_positive_quantity(data.quantity, "quantity")?;

    let item = item::receive_stock(&state.pool, id, data.quantity).await?;
    tracing::info!(item_id = id, quantity = data.quantity, "Stock received");
    Ok(ok(item))
}

/// GET /api/items (admin or staff)
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<Item>>>> {
    if !user.is_admin() && !user.is_staff() {
        return Err(AppError::forbidden("Staff access required"));
    }
    let items = item::find_all(&state.pool).await?;
    Ok(ok(items))
}
