use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::{MealFields, MealRecord};
use crate::{error::AppError, validate::is_valid_date_time};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub is_diet: bool,
    pub date_time: String,
}

impl CreateMealRequest {
    /// Splits off the owner; the rest validates like an update body.
    pub fn into_parts(self) -> (String, MealBody) {
        let body = MealBody {
            name: self.name,
            description: self.description,
            is_diet: self.is_diet,
            date_time: self.date_time,
        };
        (self.user_id, body)
    }
}

/// Body of `PUT /meals/:userId/:mealId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealBody {
    pub name: String,
    pub description: String,
    pub is_diet: bool,
    pub date_time: String,
}

impl MealBody {
    pub fn into_fields(self) -> Result<MealFields, AppError> {
        if !is_valid_date_time(&self.date_time) {
            return Err(AppError::Validation(
                "dateTime: expected YYYY-MM-DD HH:MM:SS".into(),
            ));
        }
        Ok(MealFields {
            name: self.name,
            description: self.description,
            is_diet: self.is_diet,
            occurred_at: self.date_time,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedMealResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<MealRecord>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: MealRecord,
}
