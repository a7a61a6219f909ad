use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{
    dto::{GenerateMealPlanRequest, IngredientMode, MealPlanResponse},
    prompt::{per_meal_targets, validate_meal_count, IngredientSource, MealPlanRequest},
    service::generate_meal_plan,
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn meal_plan_routes() -> Router<AppState> {
    Router::new().route("/meal-plans/generate", post(generate))
}

#[instrument(skip(state))]
pub async fn generate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GenerateMealPlanRequest>,
) -> Result<Json<MealPlanResponse>, AppError> {
    let daily = match payload.macros {
        Some(m) => {
            let daily = m.daily();
            if !daily.is_valid_amount() {
                return Err(AppError::InvalidInput(
                    "protein, carbs and fats must be non-negative numbers".into(),
                ));
            }
            daily
        }
        None => {
            let record = state.store.get_targets(user_id).await?.ok_or_else(|| {
                AppError::NotFound("no target macros saved; calculate targets first".into())
            })?;
            record.targets.daily()
        }
    };

    let num_meals = match payload.num_meals {
        Some(n) => n,
        None => {
            let settings = state.store.get_meal_settings(user_id).await?.unwrap_or_default();
            u32::try_from(settings.num_meals).map_err(anyhow::Error::from)?
        }
    };
    let num_meals = validate_meal_count(num_meals)?;

    let foods = match payload.ingredients {
        IngredientMode::FoodList => state.store.list_foods(user_id).await?,
        IngredientMode::Open => Vec::new(),
    };
    let source = match payload.ingredients {
        IngredientMode::FoodList => IngredientSource::FoodList(&foods),
        IngredientMode::Open => IngredientSource::Open,
    };

    let request = MealPlanRequest {
        num_meals,
        daily,
        source,
    };
    let plan = generate_meal_plan(state.generator.as_ref(), &request).await?;
    info!(%user_id, num_meals, meals = plan.meals.len(), "meal plan generated");

    Ok(Json(MealPlanResponse {
        num_meals,
        daily,
        per_meal: per_meal_targets(daily, num_meals)?,
        plan,
    }))
}
