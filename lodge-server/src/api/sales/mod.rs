//! Sale recording and sales report endpoints

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/sell", post(handler::sell))
        .route("/my-daily-sales", get(handler::my_daily_sales))
        .route("/today", get(handler::today))
        .route("/recent", get(handler::recent))
}
