//! Next-speaker selection for Parley group chats.
//!
//! At each turn of a multi-agent conversation the orchestrator asks a chat
//! completion model who should speak next, then maps the model's free-text
//! answer back to exactly one registered agent.
//!
//! # Overview
//!
//! - [`prompt`]: Renders roles, participants and history into one system
//!   instruction
//! - [`mentions`]: Counts whole-word mentions of each agent name, accepting
//!   `Story_writer`, `Story writer` and `Story\_writer` as the same name
//! - [`selector`]: Runs one selection: compose, await completion, resolve
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use parley_agent::{ModelConfig, OpenRouterClient, Roster};
//! use parley_memory::BufferedMemory;
//! use parley_orchestrator::SpeakerSelector;
//!
//! # async fn example() -> parley_orchestrator::Result<()> {
//! let roster = Roster::from_json(r#"[{"name": "Alice"}, {"name": "Bob"}]"#)?;
//! let client = OpenRouterClient::from_env(ModelConfig::from_env())?;
//! let selector = SpeakerSelector::new(Arc::new(BufferedMemory::new()), Arc::new(client));
//!
//! let speaker = selector.select_from(&roster).await?;
//! println!("Next: {}", speaker.name());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mentions;
pub mod prompt;
pub mod selector;

pub use error::{Result, SelectionError};
pub use mentions::{mentioned_agents, MentionCounts, MentionMatcher};
pub use prompt::{compose_prompt, selection_request};
pub use selector::{select_speaker, SpeakerSelector};

// Re-export the collaborator types callers need to drive a selection
pub use parley_agent::{Agent, AgentMetadata, ChatCompletionClient, Roster};
pub use parley_core::{ChatMessage, TextMessage};
pub use parley_memory::ChatMemory;
