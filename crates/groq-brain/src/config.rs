//! Configuration for GroqBrain.

use brain_core::BrainError;
use std::env;

/// Default Groq API base URL.
pub const DEFAULT_API_URL: &str = "https://api.groq.com";

/// Default model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for GroqBrain.
#[derive(Debug, Clone)]
pub struct GroqBrainConfig {
    /// API base URL; requests go to `{api_url}/openai/v1/chat/completions`.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further retry.
    pub retry_backoff_ms: u64,

    /// Ask the service to return a bare JSON object.
    pub json_mode: bool,
}

impl Default for GroqBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(2048),
            temperature: Some(0.2),
            timeout_secs: 30,
            max_retries: 2,
            retry_backoff_ms: 500,
            json_mode: true,
        }
    }
}

impl GroqBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GROQ_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GROQ_API_URL` - API URL (default: https://api.groq.com)
    /// - `GROQ_MODEL` - Model name (default: llama-3.3-70b-versatile)
    /// - `GROQ_MAX_TOKENS` - Max tokens (default: 2048)
    /// - `GROQ_TEMPERATURE` - Temperature (default: 0.2)
    /// - `GROQ_TIMEOUT_SECS` - Request timeout (default: 30)
    /// - `GROQ_MAX_RETRIES` - Retries for transient failures (default: 2)
    /// - `GROQ_RETRY_BACKOFF_MS` - First retry delay (default: 500)
    /// - `GROQ_JSON_MODE` - Request JSON-object output (default: true)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("GROQ_API_KEY")
            .map_err(|_| BrainError::Configuration("GROQ_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("GROQ_API_URL").unwrap_or(defaults.api_url);

        let model = env::var("GROQ_MODEL").unwrap_or(defaults.model);

        let max_tokens = env::var("GROQ_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("GROQ_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let timeout_secs = env::var("GROQ_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        let max_retries = env::var("GROQ_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_retries);

        let retry_backoff_ms = env::var("GROQ_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.retry_backoff_ms);

        let json_mode = env::var("GROQ_JSON_MODE")
            .ok()
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.json_mode);

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout_secs,
            max_retries,
            retry_backoff_ms,
            json_mode,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GroqBrainConfigBuilder {
        GroqBrainConfigBuilder::default()
    }
}

/// Builder for GroqBrainConfig.
#[derive(Debug, Default)]
pub struct GroqBrainConfigBuilder {
    config: GroqBrainConfig,
}

impl GroqBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set the number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the first retry delay.
    pub fn retry_backoff_ms(mut self, millis: u64) -> Self {
        self.config.retry_backoff_ms = millis;
        self
    }

    /// Toggle JSON-object output mode.
    pub fn json_mode(mut self, enable: bool) -> Self {
        self.config.json_mode = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GroqBrainConfig {
        self.config
    }
}
