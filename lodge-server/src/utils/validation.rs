//! Input validation helpers
//!
//! Centralized text length constants and validation functions for
//! request payloads. SQLite TEXT has no built-in length enforcement,
//! so limits are applied at the handler layer.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: items, staff
pub const MAX_NAME_LEN: usize = 200;

/// Remarks, expense descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a quantity that must be strictly positive.
pub fn validate_positive_quantity(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Validate a quantity that must be zero or greater.
pub fn validate_non_negative_quantity(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Validate a monetary amount is finite and non-negative.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("  ", "name", 10).is_err());
        assert!(validate_required_text("hello", "name", 10).is_ok());
        assert!(validate_required_text("0123456789ab", "name", 10).is_err());
    }

    #[test]
    fn optional_text_allows_absent_values() {
        assert!(validate_optional_text(&None, "remarks", 5).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "remarks", 5).is_ok());
        assert!(validate_optional_text(&Some("too long".into()), "remarks", 5).is_err());
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_positive_quantity(1, "quantity").is_ok());
        assert!(validate_positive_quantity(0, "quantity").is_err());
        assert!(validate_non_negative_quantity(0, "quantity").is_ok());
        assert!(validate_non_negative_quantity(-1, "quantity").is_err());
    }

    #[test]
    fn amount_rejects_nan_and_negative() {
        assert!(validate_amount(9.5, "amount").is_ok());
        assert!(validate_amount(f64::NAN, "amount").is_err());
        assert!(validate_amount(-0.01, "amount").is_err());
    }
}
