use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

mod error;
mod tests;

pub use error::AIError;

use crate::config::{AIConfig, AIProvider};

const MAX_RETRIES: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 1000;
const MAX_RETRY_DELAY_MS: u64 = 10_000;

/// The seam between the documentation orchestrator and whatever produces
/// text. Tests substitute a stub; production uses [`AIClient`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AIError>;
}

/// A per-request generation client. Credentials live in the owned config;
/// nothing is configured process-wide, so concurrent clients with different
/// keys never interfere.
pub struct AIClient {
    config: AIConfig,
    http: reqwest::Client,
    retry: RetryConfig,
}

impl AIClient {
    pub fn new(config: AIConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            retry: RetryConfig::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn generate_anthropic(&self, prompt: &str) -> Result<String, AIError> {
        let api_key = self
            .config
            .anthropic_api_key
            .as_ref()
            .ok_or_else(|| AIError::Validation("Anthropic API key not configured".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| AIError::Validation(format!("invalid API key: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_url = self
            .config
            .api_url
            .as_deref()
            .unwrap_or("https://api.anthropic.com/v1/messages");

        let response = self
            .http
            .post(api_url)
            .headers(headers)
            .json(&json!({
                "model": &self.config.model,
                "max_tokens": self.config.max_tokens,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await
            .map_err(|e| AIError::Network(e.to_string()))?;

        check_status(&response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AIError::Network(format!("failed to read response body: {}", e)))?;

        #[derive(Debug, Deserialize)]
        struct AnthropicResponse {
            content: Vec<AnthropicContent>,
        }

        #[derive(Debug, Deserialize)]
        struct AnthropicContent {
            #[serde(default)]
            text: String,
        }

        let parsed: AnthropicResponse = serde_json::from_str(&body)
            .map_err(|e| AIError::Parse(format!("unexpected Anthropic response: {} - {}", e, body)))?;

        let text: String = parsed
            .content
            .iter()
            .map(|block| block.text.as_str())
            .collect();

        if text.is_empty() {
            return Err(AIError::Parse(format!("empty Anthropic response: {}", body)));
        }

        Ok(text)
    }

    async fn generate_openai(&self, prompt: &str) -> Result<String, AIError> {
        let api_key = self
            .config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| AIError::Validation("OpenAI API key not configured".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| AIError::Validation(format!("invalid API key: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_url = self
            .config
            .api_url
            .as_deref()
            .unwrap_or("https://api.openai.com/v1/chat/completions");

        let response = self
            .http
            .post(api_url)
            .headers(headers)
            .json(&json!({
                "model": &self.config.model,
                "max_tokens": self.config.max_tokens,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await
            .map_err(|e| AIError::Network(e.to_string()))?;

        check_status(&response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AIError::Network(format!("failed to read response body: {}", e)))?;

        #[derive(Debug, Deserialize)]
        struct OpenAIResponse {
            choices: Vec<OpenAIChoice>,
        }

        #[derive(Debug, Deserialize)]
        struct OpenAIChoice {
            message: OpenAIMessage,
        }

        #[derive(Debug, Deserialize)]
        struct OpenAIMessage {
            #[serde(default)]
            content: String,
        }

        let parsed: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| AIError::Parse(format!("unexpected OpenAI response: {} - {}", e, body)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AIError::Parse(format!("empty OpenAI response: {}", body)))
    }
}

#[async_trait]
impl TextGenerator for AIClient {
    async fn generate(&self, prompt: &str) -> Result<String, AIError> {
        with_retries(&self.retry, || async {
            match self.config.provider {
                AIProvider::Anthropic => self.generate_anthropic(prompt).await,
                AIProvider::OpenAI => self.generate_openai(prompt).await,
            }
        })
        .await
    }
}

async fn check_status(response: &reqwest::Response) -> Result<(), AIError> {
    match response.status() {
        StatusCode::OK => Ok(()),
        StatusCode::TOO_MANY_REQUESTS => {
            Err(AIError::RateLimit("rate limit exceeded".to_string()))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(AIError::Authentication("invalid API key".to_string()))
        }
        status => Err(AIError::Api(format!("unexpected status code: {}", status))),
    }
}

#[derive(Debug)]
pub(crate) struct RetryConfig {
    max_retries: u32,
    initial_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryConfig {
    fn new() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            initial_delay_ms: INITIAL_RETRY_DELAY_MS,
            max_delay_ms: MAX_RETRY_DELAY_MS,
        }
    }

    #[cfg(test)]
    pub(crate) fn fast(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 1,
        }
    }

    fn should_retry(&self, error: &AIError) -> bool {
        matches!(
            error,
            AIError::RateLimit(_) | AIError::Network(_) | AIError::Parse(_)
        )
    }

    fn delay(&self, attempt: u32) -> Duration {
        let delay = self.initial_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

async fn with_retries<T, F, Fut>(config: &RetryConfig, f: F) -> Result<T, AIError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, AIError>>,
{
    let mut attempt = 0;
    let mut last_error = None;

    while attempt < config.max_retries {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if config.should_retry(&e) {
                    let delay = config.delay(attempt);
                    warn!("generation request failed: {}; retrying in {:?}", e, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    last_error = Some(e);
                } else {
                    return Err(e);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AIError::Network("max retries exceeded".to_string())))
}
