mod dto;
pub mod handlers;
pub(crate) mod repo;
pub mod repo_types;

pub use dto::{MealDetails, SaveMealItem, SaveMealRequest};

pub fn router() -> axum::Router<crate::state::AppState> {
    handlers::meal_routes()
}
