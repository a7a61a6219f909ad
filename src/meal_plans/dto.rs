use serde::{Deserialize, Serialize};

use super::parser::MealPlan;
use crate::nutrition::Macros;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientMode {
    #[default]
    FoodList,
    Open,
}

/// Grams per day; calories are derived at 4/4/9 kcal per gram.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MacroOverride {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroOverride {
    pub fn daily(&self) -> Macros {
        Macros::new(
            4.0 * self.protein + 4.0 * self.carbs + 9.0 * self.fats,
            self.protein,
            self.carbs,
            self.fats,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateMealPlanRequest {
    /// Falls back to the saved meal settings.
    pub num_meals: Option<u32>,
    #[serde(default)]
    pub ingredients: IngredientMode,
    /// Falls back to the saved target macros.
    pub macros: Option<MacroOverride>,
}

#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    pub num_meals: u32,
    pub daily: Macros,
    pub per_meal: Macros,
    #[serde(flatten)]
    pub plan: MealPlan,
}
