//! OpenAI-compatible `/chat/completions` client.
//!
//! Works against OpenAI itself and local servers speaking the same API
//! (Ollama, vLLM, LocalAI). The request asks for `json_object` output; the
//! message content is handed back as text unless the server already returned
//! a decoded object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{Generated, GenerationService};
use crate::{config::LlmConfig, error::AppError};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const ERROR_BODY_PREVIEW: usize = 500;

const SYSTEM_PROMPT: &str =
    "You are a nutrition assistant. Always answer with a single valid JSON object and nothing else.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<Value>,
}

#[derive(Clone)]
pub struct OpenAiGenerator {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(cfg: &LlmConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn content_to_generated(content: Value) -> Generated {
    match content {
        Value::String(text) => Generated::Text(text),
        other => Generated::Structured(other),
    }
}

#[async_trait]
impl GenerationService for OpenAiGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete_json(&self, prompt: &str) -> Result<Generated, AppError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.7,
        };

        let mut request = self.http.post(self.completions_url()).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "generation request failed");
            AppError::GenerationFailure(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let preview: String = text.chars().take(ERROR_BODY_PREVIEW).collect();
            warn!(%status, body = %preview, "generation service returned an error");
            return Err(AppError::GenerationFailure(format!("{status}: {preview}")));
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::GenerationFailure(format!("malformed response: {e}")))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::GenerationFailure("response had no message content".into()))?;

        debug!("generation completed");
        Ok(content_to_generated(content))
    }
}
