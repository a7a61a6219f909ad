//! Generation service seam: a single "complete chat, answer in JSON" call.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

pub mod json;
mod openai;

pub use openai::OpenAiGenerator;

/// What the provider handed back: either free text or an already decoded JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Text(String),
    Structured(Value),
}

impl Generated {
    /// Raw form kept for diagnostics when parsing fails.
    pub fn raw_text(&self) -> String {
        match self {
            Generated::Text(s) => s.clone(),
            Generated::Structured(v) => v.to_string(),
        }
    }
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Sends `prompt` and asks for a JSON object back. Transport, status and
    /// envelope problems surface as `AppError::GenerationFailure`.
    async fn complete_json(&self, prompt: &str) -> Result<Generated, AppError>;
}

/// Replays a fixed reply and records every prompt it receives.
pub struct CannedGenerator {
    reply: Result<Generated, String>,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn replying(reply: Generated) -> Self {
        Self {
            reply: Ok(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl GenerationService for CannedGenerator {
    async fn complete_json(&self, prompt: &str) -> Result<Generated, AppError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());
        self.reply
            .clone()
            .map_err(AppError::GenerationFailure)
    }
}
