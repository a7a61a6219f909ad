use tracing::{debug, warn};

use super::parser::{parse_meal_plan, MealPlan, MealPlanOutcome};
use super::prompt::{build_prompt, MealPlanRequest};
use crate::error::AppError;
use crate::llm::GenerationService;

/// One prompt, one generator call, one parse. No retries.
pub async fn generate_meal_plan(
    generator: &dyn GenerationService,
    request: &MealPlanRequest<'_>,
) -> Result<MealPlan, AppError> {
    let prompt = build_prompt(request)?;
    debug!(num_meals = request.num_meals, prompt_len = prompt.len(), "requesting meal plan");

    let generated = generator.complete_json(&prompt).await?;
    let outcome = parse_meal_plan(&generated);
    match &outcome {
        MealPlanOutcome::Success(plan) => debug!(meals = plan.meals.len(), "meal plan parsed"),
        MealPlanOutcome::ParseFailure { .. } => warn!("generator returned no JSON object"),
        MealPlanOutcome::SchemaMismatch { reason, .. } => {
            warn!(%reason, "generator output did not match meal plan schema")
        }
    }
    outcome.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CannedGenerator, Generated};
    use crate::meal_plans::prompt::IngredientSource;
    use crate::nutrition::Macros;

    fn request() -> MealPlanRequest<'static> {
        MealPlanRequest {
            num_meals: 2,
            daily: Macros::new(2000.0, 150.0, 200.0, 60.0),
            source: IngredientSource::Open,
        }
    }

    #[tokio::test]
    async fn fenced_reply_is_parsed() {
        let reply = "```json\n{\"meals\": [{\"meal\": \"Oats\", \"recipe\": {\"ingredients\": [{\"food\": \"oats\", \"grams\": 80}], \"instructions\": \"Cook.\"}, \"calories\": 300, \"protein\": 10, \"carbs\": 50, \"fats\": 5}]}\n```";
        let generator = CannedGenerator::replying(Generated::Text(reply.into()));

        let plan = generate_meal_plan(&generator, &request()).await.unwrap();
        assert_eq!(plan.meals.len(), 1);
        assert_eq!(plan.meals[0].meal, "Oats");

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Generate 2 meals"));
    }

    #[tokio::test]
    async fn prose_reply_is_a_parse_failure() {
        let generator = CannedGenerator::replying(Generated::Text("sorry, no plan today".into()));
        let err = generate_meal_plan(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::ParseFailure { raw } if raw == "sorry, no plan today"));
    }

    #[tokio::test]
    async fn invalid_meal_count_never_calls_generator() {
        let generator = CannedGenerator::replying(Generated::Text("{}".into()));
        let mut req = request();
        req.num_meals = 0;
        let err = generate_meal_plan(&generator, &req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let generator = CannedGenerator::failing("connection refused");
        let err = generate_meal_plan(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailure(_)));
    }
}
