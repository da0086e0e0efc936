//! Core Agent trait definition.
//!
//! Within a group chat an agent is an opaque participant: the speaker
//! selector only ever reads its name and description.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name and description of a group chat participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetadata {
    /// Unique name of the agent within a roster.
    pub name: String,

    /// Human-readable description of the agent's role.
    #[serde(default)]
    pub description: String,
}

impl AgentMetadata {
    /// Create metadata for an agent.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A participant that can be selected to speak next.
///
/// This trait is object-safe, so rosters can mix agent implementations
/// behind `Arc<dyn Agent>`.
pub trait Agent: Send + Sync {
    /// Metadata describing this agent.
    fn metadata(&self) -> &AgentMetadata;

    /// The agent's name.
    fn name(&self) -> &str {
        &self.metadata().name
    }

    /// The agent's description.
    fn description(&self) -> &str {
        &self.metadata().description
    }
}

impl Agent for AgentMetadata {
    fn metadata(&self) -> &AgentMetadata {
        self
    }
}

impl<T: Agent + ?Sized> Agent for Arc<T> {
    fn metadata(&self) -> &AgentMetadata {
        (**self).metadata()
    }
}

impl<T: Agent + ?Sized> Agent for Box<T> {
    fn metadata(&self) -> &AgentMetadata {
        (**self).metadata()
    }
}
