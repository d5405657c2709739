//! In-process stores used by the handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::{
    repo::MealStore,
    repo_types::{MealFields, MealRecord},
};
use crate::users::{repo::UserStore, repo_types::User};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    meals: Mutex<Vec<MealRecord>>,
}

impl MemoryStore {
    /// Inserts a row as-is, bypassing request validation.
    pub fn put_meal(&self, meal: MealRecord) {
        self.meals.lock().unwrap().push(meal);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, name: &str, session_id: &str) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            session_id: session_id.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn list_by_session(&self, session_id: &str) -> anyhow::Result<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| u.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        let removed = users.len() != before;
        if removed {
            self.meals.lock().unwrap().retain(|m| m.user_id != id);
        }
        Ok(removed)
    }

    async fn session_exists(&self, session_id: &str) -> anyhow::Result<bool> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.session_id == session_id))
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<MealRecord>> {
        let meals = self.meals.lock().unwrap();
        Ok(meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_one(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealRecord>> {
        let meals = self.meals.lock().unwrap();
        Ok(meals
            .iter()
            .find(|m| m.user_id == user_id && m.id == meal_id)
            .cloned())
    }

    async fn insert(&self, user_id: Uuid, fields: MealFields) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.put_meal(MealRecord {
            id,
            user_id,
            name: fields.name,
            description: fields.description,
            is_diet: Some(fields.is_diet),
            occurred_at: fields.occurred_at,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn update_one(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        fields: MealFields,
    ) -> anyhow::Result<bool> {
        let mut meals = self.meals.lock().unwrap();
        let Some(meal) = meals
            .iter_mut()
            .find(|m| m.user_id == user_id && m.id == meal_id)
        else {
            return Ok(false);
        };
        meal.name = fields.name;
        meal.description = fields.description;
        meal.is_diet = Some(fields.is_diet);
        meal.occurred_at = fields.occurred_at;
        Ok(true)
    }

    async fn delete_one(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut meals = self.meals.lock().unwrap();
        let before = meals.len();
        meals.retain(|m| !(m.user_id == user_id && m.id == meal_id));
        Ok(meals.len() != before)
    }
}
