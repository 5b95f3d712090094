//! Closing balance reconciliation and report endpoints

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/closing-balance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/close-shift-balance/{shift_id}",
            post(handler::close_shift_balance),
        )
        .route("/sales/daily/{staff_id}", get(handler::daily_sales))
        .route("/sales/monthly/{staff_id}", get(handler::monthly_sales))
}
