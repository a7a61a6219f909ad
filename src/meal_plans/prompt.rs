//! Prompt assembly for meal-plan generation.

use crate::error::AppError;
use crate::foods::repo_types::Food;
use crate::nutrition::Macros;

pub const MIN_MEALS: u32 = 1;
pub const MAX_MEALS: u32 = 8;

/// Where the generator may take ingredients from.
#[derive(Debug, Clone, Copy)]
pub enum IngredientSource<'a> {
    /// Only items from the caller's food catalog.
    FoodList(&'a [Food]),
    Open,
}

#[derive(Debug, Clone, Copy)]
pub struct MealPlanRequest<'a> {
    pub num_meals: u32,
    pub daily: Macros,
    pub source: IngredientSource<'a>,
}

pub fn validate_meal_count(num_meals: u32) -> Result<u32, AppError> {
    if (MIN_MEALS..=MAX_MEALS).contains(&num_meals) {
        Ok(num_meals)
    } else {
        Err(AppError::InvalidInput(format!(
            "number of meals must be between {MIN_MEALS} and {MAX_MEALS}, got {num_meals}"
        )))
    }
}

/// Daily targets divided evenly; the last meal does not absorb rounding.
pub fn per_meal_targets(daily: Macros, num_meals: u32) -> Result<Macros, AppError> {
    let n = validate_meal_count(num_meals)?;
    Ok(daily.scale(1.0 / f64::from(n)))
}

/// One `name: kcal, protein, carbs, fats` line per catalog item.
pub fn food_list_lines(foods: &[Food]) -> String {
    foods
        .iter()
        .map(|f| {
            format!(
                "{}: {} kcal, {}g protein, {}g carbs, {}g fats",
                f.name, f.calories, f.protein, f.carbs, f.fats
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ingredient_clause(source: IngredientSource<'_>) -> Result<String, AppError> {
    match source {
        IngredientSource::FoodList([]) => Err(AppError::InvalidInput(
            "food list is empty; add foods or request open ingredients".into(),
        )),
        IngredientSource::FoodList(foods) => Ok(format!(
            "Use only these ingredients (values per 100 g):\n{}",
            food_list_lines(foods)
        )),
        IngredientSource::Open => Ok(
            "You can freely suggest nutritious ingredients suitable for balanced meals.".into(),
        ),
    }
}

pub fn build_prompt(request: &MealPlanRequest<'_>) -> Result<String, AppError> {
    let per_meal = per_meal_targets(request.daily, request.num_meals)?;
    let ingredients = ingredient_clause(request.source)?;

    Ok(format!(
        r#"Generate {n} meals for one day. Each meal must:
- Be a typical breakfast, lunch, snack or dinner.
- Consist of 3 to 8 ingredients with specific gram amounts.
- Avoid unrealistic meals.
- Include step-by-step cooking instructions.

Each meal should meet approximately:
- Calories: {kcal:.0} kcal
- Protein: {protein:.1} g
- Carbs: {carbs:.1} g
- Fats: {fats:.1} g

Format the response strictly as a JSON object with this shape:
{{
  "meals": [
    {{
      "meal": "Meal Name",
      "recipe": {{
        "ingredients": [{{"food": "...", "grams": 0}}],
        "instructions": "Step-by-step instructions"
      }},
      "calories": 0.0,
      "protein": 0.0,
      "carbs": 0.0,
      "fats": 0.0
    }}
  ]
}}
Return only valid JSON, with no code fences and no disclaimers.

{ingredients}"#,
        n = request.num_meals,
        kcal = per_meal.calories,
        protein = per_meal.protein,
        carbs = per_meal.carbs,
        fats = per_meal.fats,
    ))
}
