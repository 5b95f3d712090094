//! Server Implementation
//!
//! HTTP server startup: router assembly, middleware layers, graceful
//! shutdown on ctrl-c.

use std::time::Duration;

use axum::Router;
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth;
use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests and embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Build the application router with all routes and layers
    pub fn build_router(state: ServerState) -> Router {
        let timeout = Duration::from_secs(state.config.request_timeout_secs);

        Router::new()
            .merge(api::health::router())
            .merge(api::auth::router())
            .merge(api::items::router())
            .merge(api::assignments::router())
            .merge(api::sales::router())
            .merge(api::shifts::router())
            .merge(api::closing_balance::router())
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth::middleware::require_auth,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(timeout))
            .with_state(state)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = Self::build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Lodge Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
