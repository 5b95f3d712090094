//! Server configuration
//!
//! All settings come from environment variables (with `.env` support via
//! dotenv in `main`). Defaults are chosen for local development.

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `HTTP_PORT` | `3000` |
    /// | `DATABASE_PATH` | `lodge.db` |
    /// | `REQUEST_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "lodge.db".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            database_path: "lodge.db".to_string(),
            request_timeout_secs: 30,
        }
    }
}
