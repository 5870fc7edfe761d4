// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// A unified StorageBackend that works with either PostgreSQL (production) or
// in-memory storage (dev mode, tests). The rest of the code treats it as an
// opaque persistence service keyed by id, with a find-by-email lookup for the
// credential side.

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user(id).await,
            Self::InMemory(db) => db.get_user(id).await,
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_email(email).await,
            Self::InMemory(db) => db.get_user_by_email(email).await,
        }
    }

    // ============================================
    // Goals
    // ============================================

    pub async fn create_goal(&self, input: CreateGoalRow) -> Result<GoalRow> {
        match self {
            Self::Postgres(db) => db.create_goal(input).await,
            Self::InMemory(db) => db.create_goal(input).await,
        }
    }

    pub async fn get_goal(&self, id: Uuid) -> Result<Option<GoalRow>> {
        match self {
            Self::Postgres(db) => db.get_goal(id).await,
            Self::InMemory(db) => db.get_goal(id).await,
        }
    }

    pub async fn list_goals(&self, user_id: Uuid) -> Result<Vec<GoalRow>> {
        match self {
            Self::Postgres(db) => db.list_goals(user_id).await,
            Self::InMemory(db) => db.list_goals(user_id).await,
        }
    }

    pub async fn update_goal(&self, id: Uuid, input: UpdateGoal) -> Result<Option<GoalRow>> {
        match self {
            Self::Postgres(db) => db.update_goal(id, input).await,
            Self::InMemory(db) => db.update_goal(id, input).await,
        }
    }

    pub async fn delete_goal(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_goal(id).await,
            Self::InMemory(db) => db.delete_goal(id).await,
        }
    }
}
