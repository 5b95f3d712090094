//! Auth API Handlers
//!
//! Registration is open only while the staff table is empty: the first
//! account ever created becomes admin regardless of the requested role.
//! After that, registration requires an admin bearer token (the route
//! itself stays outside the auth middleware so bootstrap can happen).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use shared::AppResponse;
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, StaffInfo, StaffRole};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::staff;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(data): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<StaffInfo>>> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.email, "email", MAX_EMAIL_LEN)?;
    if !data.email.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }
    if data.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if data.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }

    let is_bootstrap = staff::count(&state.pool).await? == 0;
    let role = if is_bootstrap {
        StaffRole::Admin
    } else {
        // Past bootstrap only admins may create accounts
        require_admin_token(&state, &headers)?;
        data.role.unwrap_or_default()
    };

    let password_hash = hash_password(&data.password)?;
    let created = staff::create(
        &state.pool,
        data.name.trim(),
        data.email.trim(),
        role,
        &password_hash,
    )
    .await?;

    tracing::info!(staff_id = created.id, role = %created.role, "Staff account created");
    Ok(ok(StaffInfo::from(created)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(data): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let staff = staff::find_by_email(&state.pool, data.email.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&data.password, &staff.password_hash) {
        tracing::warn!(target: "security", staff_id = staff.id, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .get_jwt_service()
        .generate_token(staff.id, &staff.name, staff.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(ok(LoginResponse {
        token,
        staff: StaffInfo::from(staff),
    }))
}

/// Validate the bearer token in `headers` and require the admin role.
///
/// Used by registration, which sits outside the auth middleware.
fn require_admin_token(state: &ServerState, headers: &HeaderMap) -> AppResult<()> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let token = JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?;
    let claims = state
        .get_jwt_service()
        .validate_token(token)
        .map_err(|_| AppError::InvalidToken)?;
    let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
    if !user.is_admin() {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
