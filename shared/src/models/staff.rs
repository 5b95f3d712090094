//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Staff,
    Guest,
}

impl Default for StaffRole {
    fn default() -> Self {
        Self::Guest
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Guest => "guest",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "guest" => Ok(Self::Guest),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Staff entity (DB row, includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

/// Safe staff view for API responses (no credentials)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub created_at: i64,
}

impl From<Staff> for StaffInfo {
    fn from(s: Staff) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            role: s.role,
            created_at: s.created_at,
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to guest; the first account ever created becomes admin.
    pub role: Option<StaffRole>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: bearer token plus the authenticated staff view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub staff: StaffInfo,
}
