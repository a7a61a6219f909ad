use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use nutriplan::app::build_app;
use nutriplan::config::AppConfig;
use nutriplan::llm::{CannedGenerator, Generated};
use nutriplan::state::AppState;
use nutriplan::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// App over an in-memory store whose generator always answers `reply`.
#[allow(dead_code)]
pub fn test_app(reply: &str) -> (Router, Arc<CannedGenerator>) {
    let generator = Arc::new(CannedGenerator::replying(Generated::Text(reply.to_string())));
    let state = AppState::from_parts(
        Arc::new(AppConfig::test_default()),
        Arc::new(MemoryStore::new()),
        generator.clone(),
    );
    (build_app(state), generator)
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` for an empty body).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Registers `username` and returns its access token.
#[allow(dead_code)]
pub async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({ "username": username, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Adds a catalog food with per-100 g macros.
#[allow(dead_code)]
pub async fn add_food(app: &Router, token: &str, name: &str, macros: [f64; 4]) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/foods",
        Some(token),
        Some(serde_json::json!({
            "name": name,
            "calories": macros[0],
            "protein": macros[1],
            "carbs": macros[2],
            "fats": macros[3],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add food failed: {body}");
}
