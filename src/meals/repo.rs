use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{MealFields, MealRecord};
use crate::db::PgStore;

/// Meal persistence, always scoped by the owning user.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<MealRecord>>;
    async fn get_one(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealRecord>>;
    async fn insert(&self, user_id: Uuid, fields: MealFields) -> anyhow::Result<Uuid>;
    /// Returns `false` when no meal matched.
    async fn update_one(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        fields: MealFields,
    ) -> anyhow::Result<bool>;
    /// Returns `false` when no meal matched.
    async fn delete_one(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
impl MealStore for PgStore {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<MealRecord>> {
        let rows = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, user_id, name, description, is_diet, date_time, created_at
            FROM meals
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("list meals by user")?;
        Ok(rows)
    }

    async fn get_one(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealRecord>> {
        let row = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, user_id, name, description, is_diet, date_time, created_at
            FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("get meal")?;
        Ok(row)
    }

    async fn insert(&self, user_id: Uuid, fields: MealFields) -> anyhow::Result<Uuid> {
        let meal_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO meals (id, user_id, name, description, is_diet, date_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.is_diet)
        .bind(&fields.occurred_at)
        .execute(&self.pool)
        .await
        .context("insert meal")?;
        Ok(meal_id)
    }

    async fn update_one(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        fields: MealFields,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE meals
               SET name = $3, description = $4, is_diet = $5, date_time = $6
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.is_diet)
        .bind(&fields.occurred_at)
        .execute(&self.pool)
        .await
        .context("update meal")?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_one(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM meals WHERE id = $1 AND user_id = $2"#)
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("delete meal")?;
        Ok(res.rows_affected() > 0)
    }
}
