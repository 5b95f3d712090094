//! Sale API Handlers

use axum::Json;
use axum::extract::{Extension, State};
use chrono::Utc;
use serde::Serialize;

use shared::AppResponse;
use shared::models::{DailySalesReport, Sale, SaleWithItem, SellRequest};

use crate::api::{require_admin, require_staff};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::sale;
use crate::utils::time::day_bounds;
use crate::utils::validation::validate_positive_quantity;
use crate::utils::{AppResult, ok};

/// Latest-sales feed size
const RECENT_LIMIT: i64 = 10;

/// One staff member's sales for the current day
#[derive(Debug, Serialize)]
pub struct MyDailySales {
    pub total_sales_value: f64,
    pub sales: Vec<SaleWithItem>,
}

/// POST /api/sales/sell (staff)
///
/// Records a sale against the caller's open shift, deducting from
/// their assignment.
pub async fn sell(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<SellRequest>,
) -> AppResult<Json<AppResponse<Sale>>> {
    require_staff(&user)?;
    validate_positive_quantity(data.quantity, "quantity")?;

    let sale = sale::record(&state.pool, user.id, data.item_id, data.quantity).await?;
    tracing::info!(
        sale_id = sale.id,
        staff_id = user.id,
        item_id = data.item_id,
        quantity = data.quantity,
        amount = sale.total_amount,
        "Sale recorded"
    );
    Ok(ok(sale))
}

/// GET /api/sales/my-daily-sales (staff)
pub async fn my_daily_sales(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<MyDailySales>>> {
    require_staff(&user)?;
    let range = day_bounds(Utc::now());
    let sales = sale::find_by_staff_in_range(&state.pool, user.id, range).await?;
    let total_sales_value = sales.iter().map(|s| s.total_amount).sum();
    Ok(ok(MyDailySales {
        total_sales_value,
        sales,
    }))
}

/// GET /api/sales/today (admin)
pub async fn today(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<DailySalesReport>>> {
    require_admin(&user)?;
    let range = day_bounds(Utc::now());
    let sales = sale::find_in_range(&state.pool, range).await?;
    let total_sales_value = sales.iter().map(|s| s.total_amount).sum();
    Ok(ok(DailySalesReport {
        total_sales_value,
        sales,
    }))
}

/// GET /api/sales/recent (admin)
pub async fn recent(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<shared::models::SaleWithStaff>>>> {
    require_admin(&user)?;
    let sales = sale::find_recent(&state.pool, RECENT_LIMIT).await?;
    Ok(ok(sales))
}
