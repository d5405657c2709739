use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::User;
use crate::db::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, name: &str, session_id: &str) -> anyhow::Result<User>;
    async fn list_by_session(&self, session_id: &str) -> anyhow::Result<Vec<User>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Removes the user and, through the foreign key, their meals.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn session_exists(&self, session_id: &str) -> anyhow::Result<bool>;
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, name: &str, session_id: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, session_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, session_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .context("insert user")?;
        Ok(user)
    }

    async fn list_by_session(&self, session_id: &str) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, session_id, created_at
            FROM users
            WHERE session_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .context("list users by session")?;
        Ok(users)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, session_id, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("find user")?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete user")?;
        Ok(res.rows_affected() > 0)
    }

    async fn session_exists(&self, session_id: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE session_id = $1)"#)
                .bind(session_id)
                .fetch_one(&self.pool)
                .await
                .context("check session")?;
        Ok(exists)
    }
}
