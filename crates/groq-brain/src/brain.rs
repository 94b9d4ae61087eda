//! GroqBrain implementation using the Groq chat-completions API.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse};
use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use crate::config::GroqBrainConfig;

/// A brain that asks a hosted Llama model on Groq to extract tasks.
///
/// Each request is a single stateless completion. Transient failures
/// (network errors, timeouts, 429 and 5xx) are retried with exponential
/// backoff up to `max_retries` times.
pub struct GroqBrain {
    client: Client,
    config: GroqBrainConfig,
}

impl GroqBrain {
    /// Create a new GroqBrain with the given configuration.
    pub fn new(config: GroqBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "GroqBrain initialized with model: {}, retries: {}",
            config.model, config.max_retries
        );

        Ok(Self { client, config })
    }

    /// Create a GroqBrain from environment variables.
    ///
    /// See [`GroqBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        let config = GroqBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GroqBrainConfig {
        &self.config
    }

    /// Build the request body for a brain request.
    fn build_request(&self, request: &BrainRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(request.system.clone()),
                ChatMessage::user(request.user_message()),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: self.config.json_mode.then(ResponseFormat::json_object),
        }
    }

    /// Send the request, retrying transient failures.
    async fn chat_completion_with_retry(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let mut attempt: u32 = 0;
        let mut backoff = Duration::from_millis(self.config.retry_backoff_ms);

        loop {
            match self.chat_completion(body).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Groq request failed, retrying"
                    );
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Make a single chat completion request.
    async fn chat_completion(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = format!(
            "{}/openai/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        debug!("Sending request to Groq API: model={}", body.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);
            return Err(classify_status(status, &message));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }
}

/// Map a non-success HTTP status to a brain error.
///
/// Rate limits and server errors are transient; everything else is not.
fn classify_status(status: StatusCode, message: &str) -> BrainError {
    let detail = format!("API error ({}): {}", status.as_u16(), message);
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        BrainError::Unavailable(detail)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        BrainError::Configuration(detail)
    } else {
        BrainError::ProcessingFailed(detail)
    }
}

#[async_trait]
impl Brain for GroqBrain {
    async fn process(&self, request: BrainRequest) -> Result<BrainResponse, BrainError> {
        debug!(kind = ?request.kind, chars = request.text.len(), "Processing brain request");

        let body = self.build_request(&request);
        let completion = self.chat_completion_with_retry(&body).await?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BrainError::ProcessingFailed("No content in response".to_string()))?;

        Ok(BrainResponse {
            text,
            model: Some(completion.model).filter(|m| !m.is_empty()),
        })
    }

    fn name(&self) -> &str {
        "GroqBrain"
    }
}
