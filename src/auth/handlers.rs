use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use super::{
    dto::{Credentials, PublicUser, RefreshRequest, TokenPair},
    extractors::AuthUser,
    jwt::{JwtKeys, TokenKind},
    password,
    repo_types::User,
};
use crate::{error::AppError, state::AppState};

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[a-z0-9_.-]{3,32}$").unwrap();
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/me", get(get_me))
}

fn token_pair(state: &AppState, user: User) -> Result<TokenPair, AppError> {
    let keys = JwtKeys::from_ref(state);
    let user_id = user.id;
    let issue = |kind: TokenKind| {
        keys.issue(user_id, kind)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("sign {kind:?} token: {e}")))
    };
    Ok(TokenPair {
        access_token: issue(TokenKind::Access)?,
        refresh_token: issue(TokenKind::Refresh)?,
        user: user.into(),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<TokenPair>, AppError> {
    let username = payload.normalized_username();
    if !is_valid_username(&username) {
        warn!(%username, "invalid username");
        return Err(AppError::InvalidInput(
            "username must be 3-32 characters of letters, digits, '_', '.' or '-'".into(),
        ));
    }
    password::check_length(&payload.password)?;

    let hash = password::hash(&payload.password)?;
    // The store enforces uniqueness; a taken name comes back as Conflict.
    let user = state
        .store
        .create_user(&username, &hash)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::Conflict(_)) {
                warn!(%username, "username already registered");
            }
        })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(token_pair(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<TokenPair>, AppError> {
    let username = payload.normalized_username();
    let user = match state.store.find_user_by_username(&username).await? {
        Some(user) if password::verify(&payload.password, &user.password_hash)? => user,
        _ => {
            warn!(%username, "login rejected");
            return Err(AppError::Unauthorized("invalid credentials".into()));
        }
    };

    info!(user_id = %user.id, "user logged in");
    Ok(Json(token_pair(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let claims = JwtKeys::from_ref(&state)
        .decode(&payload.refresh_token, TokenKind::Refresh)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user = state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("user no longer exists".into()))?;

    Ok(Json(token_pair(&state, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    state
        .store
        .find_user_by_id(user_id)
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| AppError::Unauthorized("user no longer exists".into()))
}
