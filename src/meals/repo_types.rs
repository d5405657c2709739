use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal row as stored in the `meals` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    /// `None` only for rows written outside the API; such meals belong to
    /// neither the on-diet nor the off-diet count.
    pub is_diet: Option<bool>,
    /// `YYYY-MM-DD HH:MM:SS`, compared lexically.
    #[serde(rename = "dateTime")]
    #[sqlx(rename = "date_time")]
    pub occurred_at: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Editable part of a meal, shared by insert and update.
#[derive(Debug, Clone)]
pub struct MealFields {
    pub name: String,
    pub description: String,
    pub is_diet: bool,
    pub occurred_at: String,
}
