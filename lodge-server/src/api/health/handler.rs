//! Health check handler

use axum::Json;
use serde::Serialize;

use shared::util::now_millis;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

/// GET /health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now_millis(),
    })
}
