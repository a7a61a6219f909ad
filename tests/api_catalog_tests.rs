//! Food catalog, saved meals and the daily log over HTTP.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{add_food, register, send, test_app};

const OATS: [f64; 4] = [389.0, 16.9, 66.3, 6.9];
const MILK: [f64; 4] = [42.0, 3.4, 5.0, 1.0];

fn close(value: &serde_json::Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-6
}

#[tokio::test]
async fn food_crud() {
    let (app, _) = test_app("{}");
    let token = register(&app, "jack").await;
    add_food(&app, &token, "oats", OATS).await;
    add_food(&app, &token, "milk", MILK).await;

    let (status, foods) = send(&app, Method::GET, "/api/v1/foods", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = foods
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["milk", "oats"]);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/foods",
        Some(&token),
        Some(json!({ "name": "oats", "calories": 1, "protein": 1, "carbs": 1, "fats": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/foods/milk", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/api/v1/foods/milk", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_macros_are_rejected() {
    let (app, _) = test_app("{}");
    let token = register(&app, "kate").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/foods",
        Some(&token),
        Some(json!({ "name": "weird", "calories": -5, "protein": 1, "carbs": 1, "fats": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn saved_meal_totals_come_from_the_catalog() {
    let (app, _) = test_app("{}");
    let token = register(&app, "liam").await;
    add_food(&app, &token, "oats", OATS).await;
    add_food(&app, &token, "milk", MILK).await;

    let meal = json!({
        "name": "porridge",
        "items": [
            { "food_name": "oats", "grams": 50 },
            { "food_name": "milk", "grams": 200 },
        ],
    });
    let (status, body) = send(&app, Method::POST, "/api/v1/meals", Some(&token), Some(meal)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(close(&body["totals"]["calories"], 194.5 + 84.0));

    let (status, names) = send(&app, Method::GET, "/api/v1/meals", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names, json!(["porridge"]));

    let (status, body) =
        send(&app, Method::GET, "/api/v1/meals/porridge", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["food_name"], "oats");
}

#[tokio::test]
async fn duplicate_meal_name_keeps_the_original() {
    let (app, _) = test_app("{}");
    let token = register(&app, "mona").await;
    add_food(&app, &token, "oats", OATS).await;
    add_food(&app, &token, "milk", MILK).await;

    let first = json!({ "name": "breakfast", "items": [{ "food_name": "oats", "grams": 80 }] });
    let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(&token), Some(first)).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = json!({ "name": "breakfast", "items": [{ "food_name": "milk", "grams": 300 }] });
    let (status, body) =
        send(&app, Method::POST, "/api/v1/meals", Some(&token), Some(second)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (_, body) = send(&app, Method::GET, "/api/v1/meals/breakfast", Some(&token), None).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["food_name"], "oats");
}

#[tokio::test]
async fn meal_with_unknown_food_is_not_saved() {
    let (app, _) = test_app("{}");
    let token = register(&app, "nina").await;
    add_food(&app, &token, "oats", OATS).await;

    let meal = json!({
        "name": "mystery",
        "items": [
            { "food_name": "oats", "grams": 50 },
            { "food_name": "unicorn", "grams": 10 },
        ],
    });
    let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(&token), Some(meal)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, names) = send(&app, Method::GET, "/api/v1/meals", Some(&token), None).await;
    assert_eq!(names, json!([]));
}

#[tokio::test]
async fn daily_log_totals_and_remaining() {
    let (app, _) = test_app("{}");
    let token = register(&app, "oscar").await;
    add_food(&app, &token, "oats", OATS).await;

    // Without targets there is nothing to subtract from.
    let entry = json!({ "date": "2026-03-01", "food_name": "oats", "grams": 50 });
    let (status, logged) =
        send(&app, Method::POST, "/api/v1/log", Some(&token), Some(entry)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(logged["logged_on"], "2026-03-01");
    assert!(close(&logged["calories"], 194.5));

    let (status, day) =
        send(&app, Method::GET, "/api/v1/log?date=2026-03-01", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day["entries"].as_array().unwrap().len(), 1);
    assert!(close(&day["totals"]["calories"], 194.5));
    assert!(day.get("remaining").is_none());

    let profile = json!({
        "weight_kg": 70.0,
        "height_cm": 175.0,
        "body_fat_pct": 20.0,
        "activity_level": "sedentary",
        "goal": "maintain",
    });
    send(&app, Method::PUT, "/api/v1/targets", Some(&token), Some(profile)).await;

    let (_, day) =
        send(&app, Method::GET, "/api/v1/log?date=2026-03-01", Some(&token), None).await;
    assert!(close(&day["remaining"]["calories"], 1896.0 - 194.5));
    assert!(close(&day["remaining"]["protein"], 140.0 - 8.45));

    let (_, other) =
        send(&app, Method::GET, "/api/v1/log?date=2026-03-02", Some(&token), None).await;
    assert_eq!(other["entries"], json!([]));

    let id = logged["id"].as_str().unwrap();
    let uri = format!("/api/v1/log/{id}");
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn meal_settings_default_and_bounds() {
    let (app, _) = test_app("{}");
    let token = register(&app, "pia").await;

    let (status, body) =
        send(&app, Method::GET, "/api/v1/settings/meals", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num_meals"], 4);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/settings/meals",
        Some(&token),
        Some(json!({ "num_meals": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/settings/meals",
        Some(&token),
        Some(json!({ "num_meals": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num_meals"], 3);
}

#[tokio::test]
async fn non_ascii_meal_names_round_trip() {
    let (app, _) = test_app("{}");
    let token = register(&app, "zoe").await;
    add_food(&app, &token, "oats", OATS).await;

    let meal = json!({ "name": "Crème brûlée", "items": [{ "food_name": "oats", "grams": 40 }] });
    let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(&token), Some(meal)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/meals/Cr%C3%A8me%20br%C3%BBl%C3%A9e",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Crème brûlée");
}
