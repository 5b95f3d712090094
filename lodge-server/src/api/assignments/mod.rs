//! Inventory assignment endpoints

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/assignments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/assign", post(handler::assign))
        .route("/{id}", patch(handler::adjust))
        .route("/my-items", get(handler::my_items))
        .route("/staff/{staff_id}", get(handler::staff_assignments))
}
