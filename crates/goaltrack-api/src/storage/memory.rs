// In-memory storage implementation for dev mode and tests
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// Provides a PostgreSQL-compatible API backed by in-memory HashMaps, allowing
// the server to run without a database. All data is lost on restart. Locks are
// held only for the duration of a single map operation, which gives the same
// per-record atomicity the Postgres backend provides per statement.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    goals: RwLock<HashMap<Uuid, GoalRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let mut users = self.users.write();
        // Mirrors the unique index on users.email in the Postgres schema
        if users.values().any(|u| u.email == input.email) {
            bail!("email already exists: {}", input.email);
        }
        let row = UserRow {
            id,
            email: input.email,
            name: input.name,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    /// Remove a user record. The HTTP API never exposes this; it exists so
    /// tests can simulate an account being removed out of band while a token
    /// for it is still circulating.
    pub fn remove_user(&self, id: Uuid) -> bool {
        self.users.write().remove(&id).is_some()
    }

    // ============================================
    // Goals
    // ============================================

    pub async fn create_goal(&self, input: CreateGoalRow) -> Result<GoalRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = GoalRow {
            id,
            user_id: input.user_id,
            text: input.text,
            created_at: now,
            updated_at: now,
        };
        self.goals.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_goal(&self, id: Uuid) -> Result<Option<GoalRow>> {
        Ok(self.goals.read().get(&id).cloned())
    }

    pub async fn list_goals(&self, user_id: Uuid) -> Result<Vec<GoalRow>> {
        let goals = self.goals.read();
        let mut result: Vec<_> = goals
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    pub async fn update_goal(&self, id: Uuid, input: UpdateGoal) -> Result<Option<GoalRow>> {
        let mut goals = self.goals.write();
        if let Some(goal) = goals.get_mut(&id) {
            if let Some(text) = input.text {
                goal.text = text;
            }
            goal.updated_at = Self::now();
            return Ok(Some(goal.clone()));
        }
        Ok(None)
    }

    pub async fn delete_goal(&self, id: Uuid) -> Result<bool> {
        Ok(self.goals.write().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_input(email: &str) -> CreateUserRow {
        CreateUserRow {
            email: email.to_string(),
            name: "Test User".to_string(),
            password_hash: "$argon2id$test".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_user() {
        let db = InMemoryDatabase::new();
        let created = db.create_user(user_input("a@example.com")).await.unwrap();

        let by_id = db.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");

        let by_email = db.get_user_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(db.get_user_by_email("missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = InMemoryDatabase::new();
        db.create_user(user_input("a@example.com")).await.unwrap();

        assert!(db.create_user(user_input("a@example.com")).await.is_err());
    }

    #[tokio::test]
    async fn goals_are_scoped_to_their_owner() {
        let db = InMemoryDatabase::new();
        let alice = db.create_user(user_input("alice@example.com")).await.unwrap();
        let bob = db.create_user(user_input("bob@example.com")).await.unwrap();

        db.create_goal(CreateGoalRow {
            user_id: alice.id,
            text: "first".to_string(),
        })
        .await
        .unwrap();
        db.create_goal(CreateGoalRow {
            user_id: alice.id,
            text: "second".to_string(),
        })
        .await
        .unwrap();
        db.create_goal(CreateGoalRow {
            user_id: bob.id,
            text: "other".to_string(),
        })
        .await
        .unwrap();

        let listed = db.list_goals(alice.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        // Insertion order
        assert_eq!(listed[0].text, "first");
        assert_eq!(listed[1].text, "second");
    }

    #[tokio::test]
    async fn update_replaces_text_and_none_keeps_it() {
        let db = InMemoryDatabase::new();
        let goal = db
            .create_goal(CreateGoalRow {
                user_id: Uuid::now_v7(),
                text: "before".to_string(),
            })
            .await
            .unwrap();

        let updated = db
            .update_goal(
                goal.id,
                UpdateGoal {
                    text: Some("after".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "after");

        let untouched = db
            .update_goal(goal.id, UpdateGoal::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.text, "after");

        assert!(db
            .update_goal(Uuid::now_v7(), UpdateGoal::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let db = InMemoryDatabase::new();
        let goal = db
            .create_goal(CreateGoalRow {
                user_id: Uuid::now_v7(),
                text: "gone soon".to_string(),
            })
            .await
            .unwrap();

        assert!(db.delete_goal(goal.id).await.unwrap());
        assert!(!db.delete_goal(goal.id).await.unwrap());
        assert!(db.get_goal(goal.id).await.unwrap().is_none());
    }
}
