use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{BodyProfileRequest, CalculationResponse},
    engine::{calculate, BodyProfile, MacroTargets},
    repo_types::TargetRecord,
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn target_routes() -> Router<AppState> {
    Router::new()
        .route("/targets", get(get_targets).put(save_targets))
        .route("/targets/calculate", post(calculate_targets))
}

fn profile_from(payload: BodyProfileRequest) -> Result<BodyProfile, AppError> {
    BodyProfile::try_from(payload).map_err(|e| {
        warn!(error = %e, "rejected body profile");
        AppError::from(e)
    })
}

fn targets_for(profile: &BodyProfile) -> Result<MacroTargets, AppError> {
    let targets = calculate(profile)?;
    if targets.carbs_overdrawn() {
        warn!(
            target_calories = targets.target_calories,
            carbs_g = targets.carbs_g,
            "protein and fat exceed the calorie target"
        );
    }
    Ok(targets)
}

/// Pure calculation; nothing is stored.
#[instrument(skip(payload))]
pub async fn calculate_targets(
    AuthUser(user_id): AuthUser,
    Json(payload): Json<BodyProfileRequest>,
) -> Result<Json<CalculationResponse>, AppError> {
    let profile = profile_from(payload)?;
    let targets = targets_for(&profile)?;
    Ok(Json(CalculationResponse::new(&profile, targets)))
}

#[instrument(skip(state))]
pub async fn get_targets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<TargetRecord>, AppError> {
    state
        .store
        .get_targets(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no target macros saved yet".into()))
}

/// Recomputes from the submitted profile and overwrites the stored record.
#[instrument(skip(state, payload))]
pub async fn save_targets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<BodyProfileRequest>,
) -> Result<Json<TargetRecord>, AppError> {
    let profile = profile_from(payload)?;
    let targets = targets_for(&profile)?;
    let record = state.store.upsert_targets(user_id, &profile, &targets).await?;
    info!(
        %user_id,
        target_calories = targets.target_calories,
        protein_g = targets.protein_g,
        carbs_g = targets.carbs_g,
        fats_g = targets.fats_g,
        "target macros saved"
    );
    Ok(Json(record))
}
