// Error taxonomy for the HTTP API
//
// Every failure a handler or service can produce maps onto one of these
// variants, and each variant maps onto exactly one status code. Storage
// failures are logged server-side and surface to clients as a generic 500.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use thiserror::Error;

use crate::api::common::ErrorResponse;

/// Uniform message for failed logins. Unknown email and wrong password must
/// be indistinguishable to the caller, so both paths share this string.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Duplicate email at registration (409)
    #[error("{0}")]
    Conflict(String),

    /// Failed login; uniform message regardless of cause (401)
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing/invalid/expired token, or ownership mismatch (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Operation disabled by configuration (403)
    #[error("{0}")]
    Forbidden(String),

    /// Resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure, typically from the storage layer (500)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Internal(err) => {
                // Log the real error, return a generic body
                tracing::error!("internal error: {:#}", err);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_expected_status_codes() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::conflict("dup").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::unauthorized("nope").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("off").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_credentials_message_is_fixed() {
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }
}
