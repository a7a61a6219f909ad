use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateFoodRequest, FoodLookup},
    repo_types::{Food, NewFood},
    services::{lookup_food_macros, normalize_name},
};
use crate::{auth::AuthUser, error::AppError, nutrition::Macros, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:name", delete(delete_food))
        .route("/foods/lookup/:name", get(lookup_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Food>>, AppError> {
    Ok(Json(state.store.list_foods(user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<Food>), AppError> {
    let name = normalize_name(&payload.name)?;
    let per_100g = Macros::new(payload.calories, payload.protein, payload.carbs, payload.fats);
    if !per_100g.is_valid_amount() {
        warn!(%user_id, food = %name, "rejected food with invalid macros");
        return Err(AppError::InvalidInput(
            "calories, protein, carbs and fats must be non-negative numbers".into(),
        ));
    }

    let food = state
        .store
        .insert_food(user_id, &NewFood { name, per_100g })
        .await?;
    info!(%user_id, food = %food.name, "food added");
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_food(user_id, name.trim()).await? {
        return Err(AppError::NotFound(format!("food {name:?}")));
    }
    info!(%user_id, food = %name, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn lookup_food(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(name): Path<String>,
) -> Result<Json<FoodLookup>, AppError> {
    Ok(Json(lookup_food_macros(state.generator.as_ref(), &name).await?))
}
