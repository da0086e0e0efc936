//! Error types for the agent crate.

use thiserror::Error;

/// Errors that can occur in agent and completion operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// An agent with this name is already registered.
    #[error("duplicate agent name: {0}")]
    DuplicateAgent(String),

    /// Agent names must be non-empty.
    #[error("invalid agent name: {0:?}")]
    InvalidAgentName(String),

    /// Model invocation failed.
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    /// Response parsing failed.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
