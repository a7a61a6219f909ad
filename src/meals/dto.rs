use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{MealItem, SavedMeal};
use crate::nutrition::Macros;

#[derive(Debug, Deserialize)]
pub struct SaveMealRequest {
    pub name: String,
    pub items: Vec<SaveMealItem>,
}

#[derive(Debug, Deserialize)]
pub struct SaveMealItem {
    pub food_name: String,
    pub grams: f64,
}

#[derive(Debug, Serialize)]
pub struct MealDetails {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub items: Vec<MealItem>,
    pub totals: Macros,
}

impl From<SavedMeal> for MealDetails {
    fn from(meal: SavedMeal) -> Self {
        let totals = meal.totals();
        Self {
            id: meal.id,
            name: meal.name,
            created_at: meal.created_at,
            items: meal.items,
            totals,
        }
    }
}
