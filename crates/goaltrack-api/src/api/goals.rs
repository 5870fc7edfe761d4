// Goal CRUD HTTP routes
//
// Every route requires an authenticated caller; the AuthUser extractor
// rejects with 401 before a handler body runs. The caller's id flows into
// the service as a plain parameter so goals are always scoped to the
// authenticated account.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::ListResponse;
use super::validation::validate_goal_text;
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::error::ApiError;
use crate::services::GoalService;
use crate::storage::StorageBackend;

/// A goal record owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Goal {
    pub id: Uuid,
    /// Free-text body of the goal.
    #[schema(example = "Learn Rust")]
    pub text: String,
    /// Owner; set at creation and immutable afterwards.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new goal
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateGoalRequest {
    /// Free-text body of the goal. Must be non-empty.
    #[serde(default)]
    #[schema(example = "Learn Rust")]
    pub text: String,
}

/// Request to update a goal. Only provided fields will be updated.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateGoalRequest {
    /// Replacement text for the goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Learn Rust properly")]
    pub text: Option<String>,
}

/// Acknowledgment returned after a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Id of the deleted goal.
    pub id: Uuid,
}

/// App state for goal routes
#[derive(Clone)]
pub struct GoalsState {
    pub service: Arc<GoalService>,
    pub auth: AuthState,
}

impl GoalsState {
    pub fn new(db: StorageBackend, auth: AuthState) -> Self {
        Self {
            service: Arc::new(GoalService::new(db)),
            auth,
        }
    }
}

impl FromRef<GoalsState> for AuthState {
    fn from_ref(input: &GoalsState) -> Self {
        input.auth.clone()
    }
}

/// Create goal routes
pub fn routes(state: GoalsState) -> Router {
    Router::new()
        .route("/v1/goals", get(list_goals).post(create_goal))
        .route("/v1/goals/:goal_id", put(update_goal).delete(delete_goal))
        .with_state(state)
}

/// GET /v1/goals - List the authenticated user's goals
#[utoipa::path(
    get,
    path = "/v1/goals",
    responses(
        (status = 200, description = "List of the caller's goals", body = ListResponse<Goal>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "goals"
)]
pub async fn list_goals(
    State(state): State<GoalsState>,
    user: AuthUser,
) -> Result<Json<ListResponse<Goal>>, ApiError> {
    let goals = state.service.list(user.id).await?;
    Ok(Json(ListResponse::new(goals)))
}

/// POST /v1/goals - Create a goal owned by the authenticated user
#[utoipa::path(
    post,
    path = "/v1/goals",
    request_body = CreateGoalRequest,
    responses(
        (status = 201, description = "Goal created successfully", body = Goal),
        (status = 400, description = "Missing or empty text"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "goals"
)]
pub async fn create_goal(
    State(state): State<GoalsState>,
    user: AuthUser,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    validate_goal_text(&req.text)?;
    let goal = state.service.create(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// PUT /v1/goals/{goal_id} - Update a goal owned by the authenticated user
#[utoipa::path(
    put,
    path = "/v1/goals/{goal_id}",
    params(
        ("goal_id" = Uuid, Path, description = "Goal ID")
    ),
    request_body = UpdateGoalRequest,
    responses(
        (status = 200, description = "Goal updated successfully", body = Goal),
        (status = 400, description = "Invalid patch"),
        (status = 401, description = "Not the goal's owner"),
        (status = 404, description = "Goal not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "goals"
)]
pub async fn update_goal(
    State(state): State<GoalsState>,
    user: AuthUser,
    Path(goal_id): Path<Uuid>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<Goal>, ApiError> {
    if let Some(text) = req.text.as_deref() {
        validate_goal_text(text)?;
    }
    let goal = state.service.update(user.id, goal_id, req).await?;
    Ok(Json(goal))
}

/// DELETE /v1/goals/{goal_id} - Delete a goal owned by the authenticated user
#[utoipa::path(
    delete,
    path = "/v1/goals/{goal_id}",
    params(
        ("goal_id" = Uuid, Path, description = "Goal ID")
    ),
    responses(
        (status = 200, description = "Goal deleted; body carries the id", body = DeleteResponse),
        (status = 401, description = "Not the goal's owner"),
        (status = 404, description = "Goal not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "goals"
)]
pub async fn delete_goal(
    State(state): State<GoalsState>,
    user: AuthUser,
    Path(goal_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = state.service.delete(user.id, goal_id).await?;
    Ok(Json(DeleteResponse { id }))
}
