//! Error taxonomy shared by handlers, the store and the generation client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("generation service failed: {0}")]
    GenerationFailure(String),

    /// Generator output had no extractable JSON object.
    #[error("could not parse generator output")]
    ParseFailure { raw: String },

    /// Generator output was JSON but not the expected shape.
    #[error("generator output did not match the expected schema: {reason}")]
    SchemaMismatch { reason: String, raw: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::GenerationFailure(_)
            | AppError::ParseFailure { .. }
            | AppError::SchemaMismatch { .. } => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::GenerationFailure(_) => "generation_failure",
            AppError::ParseFailure { .. } => "parse_failure",
            AppError::SchemaMismatch { .. } => "schema_mismatch",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (details, raw) = match self {
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::GenerationFailure(msg) => (Some(msg), None),
            AppError::ParseFailure { raw } => (None, Some(raw)),
            AppError::SchemaMismatch { reason, raw } => (Some(reason), Some(raw)),
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (None, None)
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (None, None)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: code,
                details,
                raw,
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_errors_map_to_bad_gateway() {
        let err = AppError::ParseFailure { raw: "nope".into() };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "parse_failure");

        let err = AppError::SchemaMismatch {
            reason: "missing meals".into(),
            raw: "{}".into(),
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
