use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::agent_api::ChatMessage;
use shared::settings::{is_usable_key, ModelProvider};
use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::{CompletionBackend, CompletionError};

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const API_KEY_ENV: &str = "OPENAI_API_KEY";
const MAX_ERROR_DETAIL_CHARS: usize = 800;

// ── Request / response types ─────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the reply text out of a chat-completions body.
///
/// Anything other than a non-blank `choices[0].message.content` is a
/// malformed payload.
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let parsed: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedPayload(e.to_string()))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedPayload("response has no choices".into()))?;
    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CompletionError::MalformedPayload(
            "first choice has no content".into(),
        )),
    }
}

/// Settings key first, then the environment. Blank and placeholder values
/// count as absent.
pub fn resolve_api_key(settings: &ModelProvider, env_value: Option<String>) -> Option<String> {
    if let Some(key) = settings.openai_auth.usable_api_key() {
        return Some(key.trim().to_string());
    }
    env_value
        .filter(|k| is_usable_key(k))
        .map(|k| k.trim().to_string())
}

// ── Client ───────────────────────────────────────────────────────────

pub struct OpenAIClient {
    http: Client,
    auth_token: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAIClient {
    /// Build a client from settings, reading `OPENAI_API_KEY` when the
    /// settings carry no key.
    pub fn from_settings(settings: &ModelProvider) -> Result<Self, CompletionError> {
        let auth_token = resolve_api_key(settings, env::var(API_KEY_ENV).ok())
            .ok_or(CompletionError::MissingCredential)?;

        Ok(Self {
            http: SHARED_HTTP.clone(),
            auth_token,
            model: settings.openai_model.clone(),
            base_url: settings
                .openai_base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.request_timeout_secs.max(1)),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let req = OpenAIRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            let detail: String = body.chars().take(MAX_ERROR_DETAIL_CHARS).collect();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                detail,
            });
        }
        parse_completion(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAIClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        self.generate(messages).await
    }
}
