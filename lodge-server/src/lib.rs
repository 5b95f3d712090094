//! Lodge Server - hospitality back office
//!
//! REST backend for a small hospitality operation: staff shift
//! lifecycles, inventory assignment against a shared stock pool,
//! point-of-sale sale recording, and per-shift closing-balance
//! reconciliation.
//!
//! # Module structure
//!
//! ```text
//! lodge-server/src/
//! ├── core/          # Config, state, server
//! ├── auth/          # JWT authentication, current-user context
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! └── utils/         # Errors, time, validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger init
pub use utils::logger::init_logger;
