// Authentication middleware and extractors
// Decision: Header-based bearer auth only; no cookies, no API keys
//
// Token checks are ordered so that clearly invalid tokens are rejected
// before any store access: header shape, then signature and expiry, then
// the credential-store lookup for the embedded user id. A token whose user
// has since been removed fails closed.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use uuid::Uuid;

use super::{config::AuthConfig, jwt::JwtService};
use crate::error::ApiError;
use crate::storage::StorageBackend;
use std::sync::Arc;

/// Authenticated user context extracted from a request
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID
    pub id: Uuid,
    /// User email
    pub email: String,
    /// User name
    pub name: String,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub jwt_service: Arc<JwtService>,
    pub db: StorageBackend,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: StorageBackend) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            jwt_service,
            db,
        }
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extractor for the authenticated user.
/// Required - rejects with 401 if the request is not authenticated.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        extract_auth_user(parts, &auth_state).await
    }
}

/// Extract authenticated user from request
async fn extract_auth_user(parts: &mut Parts, auth_state: &AuthState) -> Result<AuthUser, ApiError> {
    let token = bearer_token(&parts.headers)?;

    let claims = auth_state
        .jwt_service
        .validate_access_token(token)
        .map_err(|e| {
            tracing::debug!("token validation failed: {:#}", e);
            ApiError::unauthorized("invalid or expired token")
        })?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("invalid user id in token"))?;

    // The token can outlive the account; resolve the id against the store
    // and fail closed if the user is gone.
    let user = auth_state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("user no longer exists"))?;

    Ok(AuthUser {
        id: user.id,
        email: user.email,
        name: user.name,
    })
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("missing authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("invalid authorization header"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("authorization header must use the Bearer scheme"))?;

    if token.trim().is_empty() {
        return Err(ApiError::unauthorized("empty bearer token"));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(bearer_token(&headers_with(None)).is_err());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        assert!(bearer_token(&headers_with(Some("Basic dXNlcjpwYXNz"))).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(bearer_token(&headers_with(Some("Bearer "))).is_err());
        assert!(bearer_token(&headers_with(Some("Bearer    "))).is_err());
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
