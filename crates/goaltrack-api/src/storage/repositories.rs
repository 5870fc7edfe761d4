// Repository layer for PostgreSQL operations

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect and bring the schema up to date.
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&input.email)
        .bind(&input.name)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Goals
    // ============================================

    pub async fn create_goal(&self, input: CreateGoalRow) -> Result<GoalRow> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            INSERT INTO goals (id, user_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, text, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(input.user_id)
        .bind(&input.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_goal(&self, id: Uuid) -> Result<Option<GoalRow>> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, user_id, text, created_at, updated_at
            FROM goals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_goals(&self, user_id: Uuid) -> Result<Vec<GoalRow>> {
        let rows = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, user_id, text, created_at, updated_at
            FROM goals
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_goal(&self, id: Uuid, input: UpdateGoal) -> Result<Option<GoalRow>> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            UPDATE goals
            SET
                text = COALESCE($2, text),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, text, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_goal(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
