use serde_json::Value;
use tracing::warn;

use super::dto::FoodLookup;
use crate::error::AppError;
use crate::llm::json::{extract_object, ExtractError};
use crate::llm::GenerationService;
use crate::nutrition::Macros;
use crate::store::Store;
use uuid::Uuid;

pub(crate) fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("food name must not be empty".into()));
    }
    Ok(name.to_string())
}

/// Macros of `grams` of a catalog food. Returns the stored food name with them.
pub async fn catalog_portion(
    store: &dyn Store,
    user_id: Uuid,
    food_name: &str,
    grams: f64,
) -> Result<(String, Macros), AppError> {
    if !(grams.is_finite() && grams > 0.0) {
        return Err(AppError::InvalidInput(format!(
            "grams must be a positive number, got {grams}"
        )));
    }
    let name = normalize_name(food_name)?;
    let food = store
        .find_food(user_id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("food {name:?} is not in your catalog")))?;
    Ok((food.name.clone(), Macros::portion(food.per_100g(), grams)))
}

fn lookup_prompt(name: &str) -> String {
    format!(
        r#"Give typical nutrition values per 100 g for the food "{name}".
Respond strictly as a JSON object with this shape:
{{"name": "{name}", "calories": 0.0, "protein": 0.0, "carbs": 0.0, "fats": 0.0}}
calories in kcal, protein, carbs and fats in grams. Return only valid JSON."#
    )
}

/// Asks the generator for per-100 g macros of `name`.
pub async fn lookup_food_macros(
    generator: &dyn GenerationService,
    name: &str,
) -> Result<FoodLookup, AppError> {
    let name = normalize_name(name)?;
    let generated = generator.complete_json(&lookup_prompt(&name)).await?;

    let object = extract_object(&generated).map_err(|e| match e {
        ExtractError::Unparseable => AppError::ParseFailure {
            raw: generated.raw_text(),
        },
        ExtractError::NotAnObject => AppError::SchemaMismatch {
            reason: "top-level value is not an object".into(),
            raw: generated.raw_text(),
        },
    })?;

    let lookup: FoodLookup = serde_json::from_value(Value::Object(object)).map_err(|e| {
        warn!(error = %e, "food lookup had the wrong shape");
        AppError::SchemaMismatch {
            reason: e.to_string(),
            raw: generated.raw_text(),
        }
    })?;

    let macros = Macros::new(lookup.calories, lookup.protein, lookup.carbs, lookup.fats);
    if !macros.is_valid_amount() {
        return Err(AppError::SchemaMismatch {
            reason: "nutrition values must be non-negative numbers".into(),
            raw: generated.raw_text(),
        });
    }
    Ok(lookup)
}
