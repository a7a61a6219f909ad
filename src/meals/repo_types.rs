use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::Macros;

#[derive(Debug, Clone, FromRow)]
pub struct SavedMealRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// One ingredient of a saved meal with the macros that portion contributes.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MealItem {
    pub food_name: String,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MealItem {
    pub fn from_portion(food_name: String, grams: f64, macros: Macros) -> Self {
        Self {
            food_name,
            grams,
            calories: macros.calories,
            protein: macros.protein,
            carbs: macros.carbs,
            fats: macros.fats,
        }
    }

    pub fn macros(&self) -> Macros {
        Macros::new(self.calories, self.protein, self.carbs, self.fats)
    }
}

#[derive(Debug, Clone)]
pub struct SavedMeal {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub items: Vec<MealItem>,
}

impl SavedMeal {
    pub fn from_parts(row: SavedMealRow, items: Vec<MealItem>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            items,
        }
    }

    pub fn totals(&self) -> Macros {
        self.items.iter().map(MealItem::macros).sum()
    }
}
