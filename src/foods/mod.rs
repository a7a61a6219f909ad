mod dto;
pub mod handlers;
pub(crate) mod repo;
pub mod repo_types;
pub mod services;

pub use dto::FoodLookup;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
