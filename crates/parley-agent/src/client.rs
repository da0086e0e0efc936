//! OpenRouter API client for chat completions.
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire format, so the same
//! client works against OpenRouter or any compatible endpoint configured via
//! [`ModelConfig::with_base_url`].

use async_trait::async_trait;
use parley_core::FunctionCall;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::completion::{
    ChatCompletionClient, CompletionContent, CompletionResponse, LlmMessage, Usage,
};
use crate::config::ModelConfig;
use crate::error::{AgentError, Result};

/// Environment variable for OpenRouter API key.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// OpenRouter API client for chat completions.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    config: ModelConfig,
}

impl OpenRouterClient {
    /// Create a new client with the given API key and model configuration.
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    /// Create a client, taking the API key from the config or the environment.
    ///
    /// Uses `config.api_key` when set, otherwise `OPENROUTER_API_KEY`.
    pub fn from_env(config: ModelConfig) -> Result<Self> {
        let api_key = match config.api_key.clone() {
            Some(key) => key,
            None => std::env::var(OPENROUTER_API_KEY_ENV).map_err(|_| {
                AgentError::Configuration(format!(
                    "Missing {} environment variable",
                    OPENROUTER_API_KEY_ENV
                ))
            })?,
        };
        Ok(Self::new(api_key, config))
    }

    /// The model configuration requests are built from.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn build_request(&self, messages: Vec<LlmMessage>) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: messages.into_iter().map(ApiMessage::from).collect(),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        }
    }
}

#[async_trait]
impl ChatCompletionClient for OpenRouterClient {
    async fn create(&self, messages: Vec<LlmMessage>) -> Result<CompletionResponse> {
        let request = self.build_request(messages);

        trace!("Sending chat request: {:?}", request);

        let response = self
            .client
            .post(self.config.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "Parley")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ModelInvocation(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::ModelInvocation(format!(
                "completion API error {}: {}",
                status, text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ResponseParse(format!("Failed to parse response: {}", e)))?;

        debug!(
            id = %response.id,
            "Chat response received: {} tokens used",
            response.usage.as_ref().map_or(0, |u| u.total_tokens)
        );

        response.into_completion()
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// Conversation messages.
    pub messages: Vec<ApiMessage>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Role of the message sender.
    pub role: String,

    /// Text content of the message.
    pub content: String,
}

impl From<LlmMessage> for ApiMessage {
    fn from(msg: LlmMessage) -> Self {
        Self {
            role: msg.role.to_string(),
            content: msg.content,
        }
    }
}

/// Tool call in a response message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToolCall {
    /// Unique identifier for this tool call.
    pub id: String,

    /// Type of the tool call (always "function").
    #[serde(rename = "type")]
    pub call_type: String,

    /// Function details.
    pub function: ApiFunction,
}

impl ApiToolCall {
    /// Convert to the shared `FunctionCall` type.
    pub fn to_function_call(&self) -> Result<FunctionCall> {
        let arguments: serde_json::Value =
            serde_json::from_str(&self.function.arguments).map_err(|e| {
                AgentError::ResponseParse(format!("Invalid tool arguments JSON: {}", e))
            })?;

        Ok(FunctionCall::new(&self.id, &self.function.name, arguments))
    }
}

/// Function details in a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFunction {
    /// Name of the function to call.
    pub name: String,

    /// JSON-encoded arguments.
    pub arguments: String,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    pub id: String,

    /// Completion choices.
    pub choices: Vec<ChatChoice>,

    /// Token usage information.
    pub usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Convert the first choice into a [`CompletionResponse`].
    ///
    /// Tool calls take precedence over text. A choice with neither, or a
    /// response with no choices, is a parse error.
    pub fn into_completion(self) -> Result<CompletionResponse> {
        let usage = self.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        });

        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::ResponseParse("response contained no choices".into()))?;

        let content = match (choice.message.tool_calls, choice.message.content) {
            (Some(calls), _) if !calls.is_empty() => CompletionContent::FunctionCalls(
                calls
                    .iter()
                    .map(ApiToolCall::to_function_call)
                    .collect::<Result<Vec<_>>>()?,
            ),
            (_, Some(text)) => CompletionContent::Text(text),
            _ => {
                return Err(AgentError::ResponseParse(
                    "response message has no content".into(),
                ))
            }
        };

        Ok(CompletionResponse {
            content,
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

/// A choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The message for this choice.
    pub message: ResponseMessage,

    /// Finish reason (stop, tool_calls, length, etc.).
    pub finish_reason: Option<String>,
}

/// Message in a completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Text content of the response.
    pub content: Option<String>,

    /// Tool calls the model wants to make.
    pub tool_calls: Option<Vec<ApiToolCall>>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,

    /// Tokens in the completion.
    pub completion_tokens: u32,

    /// Total tokens used.
    pub total_tokens: u32,
}
