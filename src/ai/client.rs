//! Gemini API client

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::retry::{RetryConfig, with_retry};
use crate::config::AiConfig;
use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// A generation call that did not produce usable text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Api { status: StatusCode, body: String },
    #[error("model returned no text")]
    Empty,
}

impl GenerationError {
    /// Network trouble, rate limits and server errors may go away on their own.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Request(e) => !e.is_decode() && !e.is_builder(),
            GenerationError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            GenerationError::Empty => false,
        }
    }
}

/// Prompt in, text out. Each call is stateless and self-contained.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>>;
}

/// Client for the `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    retry: RetryConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts concatenated.
    fn into_text(self) -> Result<String, GenerationError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(GenerationError::Empty)
        } else {
            Ok(text)
        }
    }
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Build a client from the `[ai]` config section. Fails without an API key.
    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().context(
            "No Gemini API key configured. Set GEMINI_API_KEY or ai.api_key in the config file.",
        )?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let model = if config.model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            config.model.clone()
        };

        Ok(Self {
            client,
            api_key,
            model,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            retry: RetryConfig {
                max_retries: config.max_retries,
                ..RetryConfig::default()
            },
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        response.json::<GenerateResponse>().await?.into_text()
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Calling generation service");
        let result = with_retry(
            &self.retry,
            || self.request(prompt),
            GenerationError::is_transient,
        )
        .await;

        match &result {
            Ok(text) => tracing::debug!(reply_chars = text.len(), "Generation succeeded"),
            Err(e) => tracing::warn!("Generation failed: {}", e),
        }
        result
    }
}
