//! Server state
//!
//! [`ServerState`] holds shared references to every service a request
//! handler needs. It is `Clone` (cheap: a pool handle and Arcs) and is
//! installed as the axum router state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state - shared service references
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Opens the database (running embedded migrations) and constructs
    /// the JWT service from the environment.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::default());

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            jwt_service,
        })
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
