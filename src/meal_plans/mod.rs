mod dto;
pub mod handlers;
pub mod parser;
pub mod prompt;
pub mod service;

pub use dto::{GenerateMealPlanRequest, IngredientMode, MacroOverride, MealPlanResponse};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::meal_plan_routes()
}
