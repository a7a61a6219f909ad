//! Turns generator output into a typed [`MealPlan`].
//!
//! The output is untrusted. Every path ends in a [`MealPlanOutcome`] variant;
//! nothing here panics on malformed input.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::llm::json::{extract_object, ExtractError};
use crate::llm::Generated;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub meals: Vec<PlannedMeal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub meal: String,
    pub recipe: Recipe,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: Vec<Ingredient>,
    pub instructions: Instructions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub food: String,
    pub grams: f64,
}

/// Instructions are carried through as given: one block of text, or a list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Text(String),
    Steps(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MealPlanOutcome {
    Success(MealPlan),
    ParseFailure { raw: String },
    SchemaMismatch { reason: String, raw: String },
}

impl MealPlanOutcome {
    pub fn into_result(self) -> Result<MealPlan, AppError> {
        match self {
            MealPlanOutcome::Success(plan) => Ok(plan),
            MealPlanOutcome::ParseFailure { raw } => Err(AppError::ParseFailure { raw }),
            MealPlanOutcome::SchemaMismatch { reason, raw } => {
                Err(AppError::SchemaMismatch { reason, raw })
            }
        }
    }
}

pub fn parse_meal_plan(generated: &Generated) -> MealPlanOutcome {
    let mut object = match extract_object(generated) {
        Ok(object) => object,
        Err(ExtractError::Unparseable) => {
            return MealPlanOutcome::ParseFailure {
                raw: generated.raw_text(),
            }
        }
        Err(ExtractError::NotAnObject) => {
            return MealPlanOutcome::SchemaMismatch {
                reason: "top-level value is not an object".into(),
                raw: generated.raw_text(),
            }
        }
    };

    let meals = match object.remove("meals") {
        Some(meals @ Value::Array(_)) => meals,
        Some(_) => {
            return MealPlanOutcome::SchemaMismatch {
                reason: "\"meals\" is not a list".into(),
                raw: generated.raw_text(),
            }
        }
        None => {
            return MealPlanOutcome::SchemaMismatch {
                reason: "missing \"meals\" key".into(),
                raw: generated.raw_text(),
            }
        }
    };

    match serde_json::from_value::<Vec<PlannedMeal>>(meals) {
        Ok(meals) => MealPlanOutcome::Success(MealPlan { meals }),
        Err(e) => MealPlanOutcome::SchemaMismatch {
            reason: format!("meal entry has the wrong shape: {e}"),
            raw: generated.raw_text(),
        },
    }
}
