use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::repo_types::MealSettings;
use crate::{
    auth::AuthUser, error::AppError, meal_plans::prompt::validate_meal_count, state::AppState,
};

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings/meals", get(get_meal_settings).put(put_meal_settings))
}

/// Unset preferences read as the default meal count.
#[instrument(skip(state))]
pub async fn get_meal_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MealSettings>, AppError> {
    let settings = state
        .store
        .get_meal_settings(user_id)
        .await?
        .unwrap_or_default();
    Ok(Json(settings))
}

#[instrument(skip(state))]
pub async fn put_meal_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<MealSettings>,
) -> Result<Json<MealSettings>, AppError> {
    let num_meals = u32::try_from(payload.num_meals)
        .map_err(|_| AppError::InvalidInput("number of meals must be positive".into()))?;
    validate_meal_count(num_meals)?;

    let saved = state.store.upsert_meal_settings(user_id, payload).await?;
    info!(%user_id, num_meals = saved.num_meals, "meal settings saved");
    Ok(Json(saved))
}
