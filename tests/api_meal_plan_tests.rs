//! Meal plan generation against a canned generator.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{add_food, register, send, test_app};

const PLAN: &str = r#"```json
{
  "meals": [
    {
      "meal": "Oatmeal with milk",
      "recipe": {
        "ingredients": [{"food": "oats", "grams": 80}, {"food": "milk", "grams": 250}],
        "instructions": ["Heat the milk.", "Stir in the oats and simmer 5 minutes."]
      },
      "calories": 416.2,
      "protein": 22.0,
      "carbs": 65.5,
      "fats": 8.0
    }
  ]
}
```"#;

#[tokio::test]
async fn generates_from_override_with_open_ingredients() {
    let (app, generator) = test_app(PLAN);
    let token = register(&app, "quinn").await;

    let request = json!({
        "num_meals": 4,
        "ingredients": "open",
        "macros": { "protein": 150, "carbs": 200, "fats": 60 },
    });
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(request),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["num_meals"], 4);
    assert_eq!(body["daily"]["calories"], 1940.0);
    assert_eq!(body["per_meal"]["protein"], 37.5);
    assert_eq!(body["meals"][0]["meal"], "Oatmeal with milk");
    assert_eq!(body["meals"][0]["recipe"]["instructions"][1], "Stir in the oats and simmer 5 minutes.");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Generate 4 meals"));
    assert!(prompts[0].contains("Calories: 485 kcal"));
    assert!(prompts[0].contains("freely suggest"));
}

#[tokio::test]
async fn uses_saved_targets_settings_and_food_list() {
    let (app, generator) = test_app(PLAN);
    let token = register(&app, "rosa").await;
    add_food(&app, &token, "oats", [389.0, 16.9, 66.3, 6.9]).await;

    let profile = json!({
        "weight_kg": 70.0,
        "height_cm": 175.0,
        "body_fat_pct": 20.0,
        "activity_level": "sedentary",
        "goal": "maintain",
    });
    send(&app, Method::PUT, "/api/v1/targets", Some(&token), Some(profile)).await;
    send(
        &app,
        Method::PUT,
        "/api/v1/settings/meals",
        Some(&token),
        Some(json!({ "num_meals": 2 })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["num_meals"], 2);
    assert_eq!(body["daily"]["calories"], 1896.0);
    assert_eq!(body["per_meal"]["calories"], 948.0);

    let prompt = &generator.prompts()[0];
    assert!(prompt.contains("Generate 2 meals"));
    assert!(prompt.contains("oats: 389 kcal"));
}

#[tokio::test]
async fn missing_targets_without_override_is_not_found() {
    let (app, generator) = test_app(PLAN);
    let token = register(&app, "sam").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(json!({ "ingredients": "open" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn empty_food_list_is_rejected_before_generation() {
    let (app, generator) = test_app(PLAN);
    let token = register(&app, "tara").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(json!({ "macros": { "protein": 100, "carbs": 100, "fats": 50 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn out_of_range_meal_count_is_rejected() {
    let (app, _) = test_app(PLAN);
    let token = register(&app, "uma").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(json!({
            "num_meals": 9,
            "ingredients": "open",
            "macros": { "protein": 100, "carbs": 100, "fats": 50 },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn prose_reply_is_a_parse_failure_with_raw_text() {
    let reply = "I'm sorry, I can't plan meals right now.";
    let (app, _) = test_app(reply);
    let token = register(&app, "vic").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(json!({ "ingredients": "open", "macros": { "protein": 100, "carbs": 100, "fats": 50 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "parse_failure");
    assert_eq!(body["raw"], reply);
}

#[tokio::test]
async fn wrong_shape_is_a_schema_mismatch() {
    let reply = r#"{"plan": [{"meal": "Toast"}]}"#;
    let (app, _) = test_app(reply);
    let token = register(&app, "wes").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/meal-plans/generate",
        Some(&token),
        Some(json!({ "ingredients": "open", "macros": { "protein": 100, "carbs": 100, "fats": 50 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "schema_mismatch");
    assert_eq!(body["raw"], reply);
    assert!(body["details"].as_str().unwrap().contains("meals"));
}
