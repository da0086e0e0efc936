//! Error types for speaker selection.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors surfaced by a speaker-selection call.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Selection needs at least one candidate agent.
    #[error("cannot select a speaker from an empty roster")]
    EmptyRoster,

    /// A history entry is not a plain text message.
    #[error("history entry {index} is a {kind} message; only text messages are supported")]
    UnsupportedMessage {
        /// Position of the entry in the history.
        index: usize,
        /// Variant label of the offending message.
        kind: &'static str,
    },

    /// The model answered with something other than text.
    #[error("expected a text completion, got {kind}")]
    NonTextResponse {
        /// Variant label of the returned content.
        kind: &'static str,
    },

    /// The response did not mention exactly one agent.
    #[error("expected exactly one agent to be mentioned, but got {mentions:?}")]
    Ambiguous {
        /// Every agent that was mentioned, with counts.
        mentions: BTreeMap<String, usize>,
        /// The raw model response.
        response: String,
    },

    /// A mentioned name has no agent in the roster.
    #[error("mentioned agent not found in roster: {0}")]
    UnknownAgent(String),

    /// Reading the conversation history failed.
    #[error("memory error: {0}")]
    Memory(#[from] parley_memory::MemoryError),

    /// The completion call failed.
    #[error("completion error: {0}")]
    Completion(#[from] parley_agent::AgentError),

    /// A mention pattern could not be compiled.
    #[error("invalid mention pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl SelectionError {
    /// Whether a caller may reasonably retry selection.
    ///
    /// Only an ambiguous or empty answer qualifies; everything else indicates
    /// a broken precondition or a failed collaborator.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;
