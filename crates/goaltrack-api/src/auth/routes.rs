// Authentication HTTP routes
// Decision: Use /v1/auth/* prefix for all auth endpoints (consistent with
// other API routes)
//
// Login failures must not reveal whether the email exists: unknown email and
// wrong password both surface ApiError::InvalidCredentials, a single shared
// variant with a single message.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::middleware::{AuthState, AuthUser};
use crate::api::validation::{validate_login_input, validate_register_input};
use crate::error::ApiError;
use crate::storage::{
    models::{CreateUserRow, UserRow},
    password::{hash_password, verify_password},
};

/// Register request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public user fields. The password hash never leaves the storage layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserInfoResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// Response for successful registration or login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserInfoResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        // Public routes
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
        // Protected routes
        .route("/v1/auth/me", get(get_current_user))
        .with_state(state)
}

/// POST /v1/auth/register - Register a new user
pub async fn register(
    State(state): State<AuthState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if state.config.disable_signup {
        return Err(ApiError::forbidden("registration is disabled"));
    }

    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("name, email and password are required"));
    }
    validate_register_input(name, email, &req.password)?;

    let existing = state.db.get_user_by_email(email).await?;
    if existing.is_some() {
        return Err(ApiError::conflict("email already registered"));
    }

    let password_hash = hash_password(&req.password)?;

    let user = state
        .db
        .create_user(CreateUserRow {
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
        })
        .await?;

    let response = token_response(&state, user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /v1/auth/login - Login with email and password
pub async fn login(
    State(state): State<AuthState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validate_login_input(&req.email, &req.password)?;

    let user = state
        .db
        .get_user_by_email(req.email.trim())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        tracing::error!("password verification error: {:#}", e);
        ApiError::InvalidCredentials
    })?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(token_response(&state, user)?))
}

/// GET /v1/auth/me - Get current user info
pub async fn get_current_user(
    State(state): State<AuthState>,
    user: AuthUser,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let row = state
        .db
        .get_user(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(row.into()))
}

/// Helper: mint a fresh token and bundle it with the user's public fields
fn token_response(state: &AuthState, user: UserRow) -> Result<AuthResponse, ApiError> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email, &user.name)?;

    Ok(AuthResponse {
        user: user.into(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_lifetime_secs(),
    })
}
