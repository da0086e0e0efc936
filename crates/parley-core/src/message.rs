//! Conversation message types.
//!
//! A group chat's history is a list of [`ChatMessage`]s, oldest first. Each
//! message records which participant emitted it. Only plain text messages can
//! be rendered into a speaker-selection prompt; the other variants exist so
//! that histories containing them can be stored and rejected explicitly.

use serde::{Deserialize, Serialize};

/// A plain text message emitted by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    /// Name of the emitting participant.
    pub source: String,

    /// Text content of the message.
    pub content: String,
}

impl TextMessage {
    /// Create a new text message.
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }
}

/// One part of a multi-modal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Inline text.
    Text { text: String },
    /// Image referenced by URL (or data URI).
    Image { url: String },
}

/// A request to invoke a function, as emitted by a participant or a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Identifier correlating the call with its result.
    pub id: String,

    /// Name of the function to invoke.
    pub name: String,

    /// Arguments as a JSON value.
    pub arguments: serde_json::Value,
}

impl FunctionCall {
    /// Create a new function call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// A single entry in a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatMessage {
    /// Plain text.
    Text(TextMessage),

    /// Text interleaved with images.
    MultiModal {
        source: String,
        content: Vec<ContentPart>,
    },

    /// One or more function calls.
    FunctionCall {
        source: String,
        calls: Vec<FunctionCall>,
    },

    /// Output of an executed function call.
    FunctionResult {
        source: String,
        call_id: String,
        content: String,
    },
}

impl ChatMessage {
    /// Create a plain text message.
    pub fn text(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Text(TextMessage::new(source, content))
    }

    /// Name of the participant that emitted this message.
    pub fn source(&self) -> &str {
        match self {
            Self::Text(msg) => &msg.source,
            Self::MultiModal { source, .. }
            | Self::FunctionCall { source, .. }
            | Self::FunctionResult { source, .. } => source,
        }
    }

    /// Short label for the message variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::MultiModal { .. } => "multi_modal",
            Self::FunctionCall { .. } => "function_call",
            Self::FunctionResult { .. } => "function_result",
        }
    }

    /// The text message, if this is one.
    pub fn as_text(&self) -> Option<&TextMessage> {
        match self {
            Self::Text(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<TextMessage> for ChatMessage {
    fn from(msg: TextMessage) -> Self {
        Self::Text(msg)
    }
}
