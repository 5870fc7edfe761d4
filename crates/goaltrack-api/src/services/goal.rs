// Goal service for business logic
//
// The ownership protocol for mutation is a fixed three-step order:
//   1. load the goal by id            -> absent: NotFound
//   2. re-resolve the acting user     -> absent: Unauthorized
//   3. compare owner id to actor id   -> mismatch: Unauthorized
// Step 2 is independent of the token check the extractor already did: a
// token can outlive its account, and the mutation path re-checks against
// the store. The order determines which error a caller sees, so it must
// not be rearranged.

use uuid::Uuid;

use crate::api::goals::{CreateGoalRequest, Goal, UpdateGoalRequest};
use crate::error::ApiError;
use crate::storage::{
    models::{CreateGoalRow, GoalRow, UpdateGoal},
    StorageBackend,
};

pub struct GoalService {
    db: StorageBackend,
}

impl GoalService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    /// All goals owned by `user_id`, in insertion order.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Goal>, ApiError> {
        let rows = self.db.list_goals(user_id).await?;
        Ok(rows.into_iter().map(Self::row_to_goal).collect())
    }

    /// Create a goal owned by `user_id`. Nothing is persisted on failure.
    pub async fn create(&self, user_id: Uuid, req: CreateGoalRequest) -> Result<Goal, ApiError> {
        let text = req.text.trim();
        if text.is_empty() {
            return Err(ApiError::validation("a text field is required"));
        }

        let row = self
            .db
            .create_goal(CreateGoalRow {
                user_id,
                text: text.to_string(),
            })
            .await?;

        Ok(Self::row_to_goal(row))
    }

    /// Replace the text of a goal owned by `user_id`.
    pub async fn update(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        req: UpdateGoalRequest,
    ) -> Result<Goal, ApiError> {
        self.authorize_owner(user_id, goal_id).await?;

        // Validated only after the ownership protocol has run, so malformed
        // patches still see the not-found/unauthorized outcomes above.
        let text = match req.text {
            Some(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ApiError::validation("a text field is required"));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let row = self
            .db
            .update_goal(goal_id, UpdateGoal { text })
            .await?
            // Deleted between the check and the write; same outcome as step 1
            .ok_or_else(|| ApiError::not_found("goal not found"))?;

        Ok(Self::row_to_goal(row))
    }

    /// Delete a goal owned by `user_id`; returns the deleted id.
    pub async fn delete(&self, user_id: Uuid, goal_id: Uuid) -> Result<Uuid, ApiError> {
        self.authorize_owner(user_id, goal_id).await?;

        let deleted = self.db.delete_goal(goal_id).await?;
        if !deleted {
            return Err(ApiError::not_found("goal not found"));
        }

        Ok(goal_id)
    }

    /// The three-step ownership check.
    async fn authorize_owner(&self, user_id: Uuid, goal_id: Uuid) -> Result<(), ApiError> {
        let goal = self
            .db
            .get_goal(goal_id)
            .await?
            .ok_or_else(|| ApiError::not_found("goal not found"))?;

        let actor = self
            .db
            .get_user(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("user not found"))?;

        if goal.user_id != actor.id {
            return Err(ApiError::unauthorized("user not authorized"));
        }

        Ok(())
    }

    fn row_to_goal(row: GoalRow) -> Goal {
        Goal {
            id: row.id,
            text: row.text,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
