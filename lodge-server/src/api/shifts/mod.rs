//! Shift lifecycle endpoints

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/start-shift", post(handler::start_shift))
        .route("/close-shift", post(handler::close_shift))
        .route("/check-shift", get(handler::check_shift))
        .route("/sales-per-shift", get(handler::sales_per_shift))
        .route("/expenses", get(handler::expenses))
}
