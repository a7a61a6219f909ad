use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{MealDetails, SaveMealRequest},
    repo_types::MealItem,
};
use crate::{auth::AuthUser, error::AppError, foods::services::catalog_portion, state::AppState};

/// Path of a saved meal, with the name percent-encoded as one segment.
fn meal_location(name: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!("/api/v1/meals/{}", urlencoding::encode(name)))
        .map_err(|e| AppError::Internal(e.into()))
}

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meal_names).post(save_meal))
        .route("/meals/:name", get(get_meal).delete(delete_meal))
}

#[instrument(skip(state))]
pub async fn list_meal_names(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.store.list_meal_names(user_id).await?))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(name): Path<String>,
) -> Result<Json<MealDetails>, AppError> {
    let meal = state
        .store
        .find_meal(user_id, name.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("meal {name:?}")))?;
    Ok(Json(meal.into()))
}

/// POST /meals { name, items: [{ food_name, grams }] }
///
/// Item macros are computed from the caller's catalog at save time.
#[instrument(skip(state, payload))]
pub async fn save_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealDetails>), AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::InvalidInput("meal name must not be empty".into()));
    }
    if payload.items.is_empty() {
        return Err(AppError::InvalidInput("a meal needs at least one item".into()));
    }

    // Duplicate names are rejected before any catalog lookup.
    if state.store.find_meal(user_id, &name).await?.is_some() {
        warn!(%user_id, meal = %name, "meal name already used");
        return Err(AppError::Conflict(format!("meal {name:?} already exists")));
    }

    let mut items = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let (food_name, macros) =
            catalog_portion(state.store.as_ref(), user_id, &item.food_name, item.grams).await?;
        items.push(MealItem::from_portion(food_name, item.grams, macros));
    }

    let meal = state.store.insert_meal(user_id, &name, &items).await?;
    info!(%user_id, meal_id = %meal.id, meal = %meal.name, items = meal.items.len(), "meal saved");

    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, meal_location(&meal.name)?);

    Ok((StatusCode::CREATED, headers, Json(meal.into())))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_meal(user_id, name.trim()).await? {
        return Err(AppError::NotFound(format!("meal {name:?}")));
    }
    info!(%user_id, meal = %name, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
