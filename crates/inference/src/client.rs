//! Ollama `/api/generate` client
//!
//! One blocking-style request per prompt: the full completion comes back in a
//! single JSON body (`stream: false`). Only HTTP 200 counts as success; no
//! timeout and no retry are applied.

use async_trait::async_trait;
use complexity_common::{EvalError, OllamaConfig, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Anything that turns a prompt into completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Completion text, already trimmed of surrounding whitespace.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Full URL of the generate endpoint
    url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::new(config.url.clone(), config.model.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EvalError::Inference(format!("request to {} failed: {e}", self.url)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(EvalError::Inference(format!(
                "{} returned status {status}",
                self.url
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EvalError::Inference(format!("invalid response body: {e}")))?;
        let text = parsed
            .response
            .ok_or_else(|| EvalError::Inference("response body has no `response` field".to_string()))?;

        debug!(response_len = text.len(), "Received completion");
        Ok(text.trim().to_string())
    }
}
