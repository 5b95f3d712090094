//! Authentication module
//!
//! JWT issuance/validation and the axum middleware that injects
//! [`CurrentUser`] into request extensions.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
