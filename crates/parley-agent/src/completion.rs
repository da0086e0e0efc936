//! Chat completion interface.
//!
//! [`ChatCompletionClient`] is the seam between the speaker selector and
//! whatever model backend generates text. Implementations receive role-tagged
//! messages and return either text or function calls.

use async_trait::async_trait;
use parley_core::FunctionCall;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;

/// Role of a message sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions/context).
    System,
    /// User message.
    User,
    /// Assistant (model) message.
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A role-tagged message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    /// Role of the message sender.
    pub role: MessageRole,

    /// Text content of the message.
    pub content: String,
}

impl LlmMessage {
    /// Create a message with an explicit role.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// What the model produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CompletionContent {
    /// Generated text.
    Text(String),
    /// Function calls instead of text.
    FunctionCalls(Vec<FunctionCall>),
}

impl CompletionContent {
    /// Short label for the content variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::FunctionCalls(_) => "function_calls",
        }
    }

    /// The generated text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::FunctionCalls(_) => None,
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,

    /// Tokens in the completion.
    pub completion_tokens: u32,
}

/// Result of one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: CompletionContent,

    /// Token usage, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub usage: Option<Usage>,

    /// Why generation stopped (stop, length, tool_calls, ...).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// A plain text response with no usage information.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: CompletionContent::Text(content.into()),
            usage: None,
            finish_reason: None,
        }
    }

    /// A function-call response with no usage information.
    pub fn function_calls(calls: Vec<FunctionCall>) -> Self {
        Self {
            content: CompletionContent::FunctionCalls(calls),
            usage: None,
            finish_reason: None,
        }
    }
}

/// A text-generation backend.
///
/// Implementations must not retry internally in a way that changes the
/// one-request-per-call contract callers rely on; cancellation follows the
/// returned future being dropped.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Generate a completion for `messages`.
    async fn create(&self, messages: Vec<LlmMessage>) -> Result<CompletionResponse>;
}

#[async_trait]
impl<T: ChatCompletionClient + ?Sized> ChatCompletionClient for Arc<T> {
    async fn create(&self, messages: Vec<LlmMessage>) -> Result<CompletionResponse> {
        (**self).create(messages).await
    }
}
