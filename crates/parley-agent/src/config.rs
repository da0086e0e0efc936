//! Model configuration types for chat completion providers.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the model.
pub const MODEL_ENV: &str = "PARLEY_MODEL";

/// Environment variable overriding the completions endpoint.
pub const BASE_URL_ENV: &str = "PARLEY_BASE_URL";

/// OpenRouter chat completions endpoint.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// LLM provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// OpenRouter API (supports multiple models).
    #[default]
    OpenRouter,
    /// Any other OpenAI-compatible endpoint.
    OpenAICompatible,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenRouter => write!(f, "openrouter"),
            Self::OpenAICompatible => write!(f, "openai_compatible"),
        }
    }
}

/// Model configuration for a completion client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (e.g., "anthropic/claude-sonnet-4", "openai/gpt-4o").
    pub model: String,

    /// Maximum tokens to generate in responses.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for response generation (0.0 to 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// LLM provider to use.
    #[serde(default)]
    pub provider: Provider,

    /// Completions endpoint override.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_url: Option<String>,

    /// Optional API key override (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_key: Option<String>,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "anthropic/claude-sonnet-4".into(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            provider: Provider::default(),
            base_url: None,
            api_key: None,
        }
    }
}

impl ModelConfig {
    /// Create a new model configuration with the given model ID.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Configuration tuned for naming the next speaker: deterministic and short.
    pub fn for_selection() -> Self {
        Self {
            max_tokens: 64,
            temperature: 0.0,
            ..Default::default()
        }
    }

    /// Apply `PARLEY_MODEL` and `PARLEY_BASE_URL` on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self = self.with_base_url(url);
            }
        }
        self
    }

    /// Selection configuration with environment overrides applied.
    pub fn from_env() -> Self {
        Self::for_selection().with_env_overrides()
    }

    /// Set the maximum tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Point the client at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self.provider = Provider::OpenAICompatible;
        self
    }

    /// Set an explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENROUTER_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::OpenRouter.to_string(), "openrouter");
        assert_eq!(Provider::OpenAICompatible.to_string(), "openai_compatible");
    }

    #[test]
    fn test_model_config_default() {
        let config = ModelConfig::default();
        assert_eq!(config.model, "anthropic/claude-sonnet-4");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.provider, Provider::OpenRouter);
        assert_eq!(config.endpoint(), OPENROUTER_API_URL);
    }

    #[test]
    fn test_selection_config() {
        let config = ModelConfig::for_selection();
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 64);
    }

    #[test]
    fn test_model_config_builder() {
        let config = ModelConfig::new("test-model")
            .with_max_tokens(1000)
            .with_temperature(0.5)
            .with_base_url("http://localhost:8080/v1/chat/completions")
            .with_api_key("sk-test");

        assert_eq!(config.model, "test-model");
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.provider, Provider::OpenAICompatible);
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_temperature_clamping() {
        let config = ModelConfig::default().with_temperature(5.0);
        assert_eq!(config.temperature, 2.0);

        let config = ModelConfig::default().with_temperature(-1.0);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ModelConfig = serde_json::from_str(r#"{"model": "openai/gpt-4o"}"#).unwrap();
        assert_eq!(config.model, "openai/gpt-4o");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.provider, Provider::OpenRouter);
        assert!(config.base_url.is_none());
    }
}
