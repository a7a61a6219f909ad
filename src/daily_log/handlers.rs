use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{DayQuery, DaySummary, LogFoodRequest},
    repo_types::{LogEntry, NewLogEntry},
};
use crate::{
    auth::AuthUser, error::AppError, foods::services::catalog_portion, nutrition::Macros,
    state::AppState,
};

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/log", get(get_day).post(log_food))
        .route("/log/:id", delete(delete_entry))
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<DaySummary>, AppError> {
    let date = q.date.unwrap_or_else(today);
    let entries = state.store.list_log_entries(user_id, date).await?;
    let totals: Macros = entries.iter().map(LogEntry::macros).sum();

    let remaining = state
        .store
        .get_targets(user_id)
        .await?
        .map(|record| record.targets.daily() - totals);

    Ok(Json(DaySummary {
        date,
        entries,
        totals,
        remaining,
    }))
}

#[instrument(skip(state, payload))]
pub async fn log_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogFoodRequest>,
) -> Result<(StatusCode, Json<LogEntry>), AppError> {
    let (food_name, macros) =
        catalog_portion(state.store.as_ref(), user_id, &payload.food_name, payload.grams).await?;

    let entry = state
        .store
        .insert_log_entry(
            user_id,
            &NewLogEntry {
                logged_on: payload.date.unwrap_or_else(today),
                food_name,
                grams: payload.grams,
                macros,
            },
        )
        .await?;
    info!(%user_id, entry_id = %entry.id, food = %entry.food_name, "food logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_log_entry(user_id, id).await? {
        return Err(AppError::NotFound(format!("log entry {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
