// Input size limits for the public API
//
// Last-resort limits to guard the service from abuse. These are hard limits,
// not configurable. Values chosen to allow legitimate use while preventing
// resource exhaustion. Emptiness/shape checks live with the business logic;
// only byte-size ceilings live here.

use crate::error::ApiError;

/// Maximum size for a user's display name.
pub const MAX_NAME_BYTES: usize = 256;

/// Maximum size for an email address. RFC 5321 caps addresses at 320 octets.
pub const MAX_EMAIL_BYTES: usize = 320;

/// Maximum size for a password. Argon2 input, so bounded well below any
/// hashing pathology.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Maximum size for a goal's text body.
pub const MAX_GOAL_TEXT_BYTES: usize = 64 * 1024; // 64 KB

/// Generic message returned to clients.
/// Intentionally vague to avoid leaking which field exceeded limits.
pub const LIMIT_ERROR_MESSAGE: &str = "input exceeds allowed limits";

fn check(field: &str, len: usize, max: usize) -> Result<(), ApiError> {
    if len > max {
        tracing::warn!("{} exceeds limit: {} bytes (max: {})", field, len, max);
        return Err(ApiError::validation(LIMIT_ERROR_MESSAGE));
    }
    Ok(())
}

/// Validate field sizes for registration input
pub fn validate_register_input(name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    check("name", name.len(), MAX_NAME_BYTES)?;
    check("email", email.len(), MAX_EMAIL_BYTES)?;
    check("password", password.len(), MAX_PASSWORD_BYTES)?;
    Ok(())
}

/// Validate field sizes for login input
pub fn validate_login_input(email: &str, password: &str) -> Result<(), ApiError> {
    check("email", email.len(), MAX_EMAIL_BYTES)?;
    check("password", password.len(), MAX_PASSWORD_BYTES)?;
    Ok(())
}

/// Validate a goal text body size
pub fn validate_goal_text(text: &str) -> Result<(), ApiError> {
    check("goal text", text.len(), MAX_GOAL_TEXT_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_admit_values_at_the_boundary() {
        assert!(validate_register_input(
            &"x".repeat(MAX_NAME_BYTES),
            &"x".repeat(MAX_EMAIL_BYTES),
            &"x".repeat(MAX_PASSWORD_BYTES),
        )
        .is_ok());
        assert!(validate_goal_text(&"x".repeat(MAX_GOAL_TEXT_BYTES)).is_ok());
    }

    #[test]
    fn oversized_fields_are_rejected() {
        assert!(validate_register_input(&"x".repeat(MAX_NAME_BYTES + 1), "a@b.c", "pw").is_err());
        assert!(validate_register_input("n", &"x".repeat(MAX_EMAIL_BYTES + 1), "pw").is_err());
        assert!(validate_register_input("n", "a@b.c", &"x".repeat(MAX_PASSWORD_BYTES + 1)).is_err());
        assert!(validate_login_input(&"x".repeat(MAX_EMAIL_BYTES + 1), "pw").is_err());
        assert!(validate_goal_text(&"x".repeat(MAX_GOAL_TEXT_BYTES + 1)).is_err());
    }
}
