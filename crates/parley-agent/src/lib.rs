//! Agents, rosters and chat completion clients for Parley group chats.
//!
//! # Core Types
//!
//! - [`Agent`]: A group chat participant exposing a name and description
//! - [`AgentMetadata`]: Plain name/description pair, itself an `Agent`
//! - [`Roster`]: Ordered agent table that rejects duplicate names
//! - [`ChatCompletionClient`]: Async interface to a text-generation backend
//! - [`OpenRouterClient`]: HTTP implementation for OpenAI-compatible APIs
//! - [`ModelConfig`]: Model, temperature and endpoint settings
//!
//! # Example
//!
//! ```ignore
//! use parley_agent::{ChatCompletionClient, LlmMessage, ModelConfig, OpenRouterClient, Roster};
//!
//! let roster = Roster::from_json(r#"[{"name": "Alice"}, {"name": "Bob"}]"#)?;
//! let client = OpenRouterClient::from_env(ModelConfig::from_env())?;
//!
//! let response = client.create(vec![LlmMessage::system("Say hi")]).await?;
//! ```

pub mod agent;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod roster;

// Re-export commonly used items
pub use agent::{Agent, AgentMetadata};
pub use client::OpenRouterClient;
pub use completion::{
    ChatCompletionClient, CompletionContent, CompletionResponse, LlmMessage, MessageRole, Usage,
};
pub use config::{ModelConfig, Provider};
pub use error::{AgentError, Result};
pub use roster::Roster;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Mock client that echoes the last message it received.
    struct EchoClient {
        seen: Mutex<Vec<Vec<LlmMessage>>>,
    }

    #[async_trait]
    impl ChatCompletionClient for EchoClient {
        async fn create(&self, messages: Vec<LlmMessage>) -> Result<CompletionResponse> {
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.seen.lock().unwrap().push(messages);
            Ok(CompletionResponse::text(last))
        }
    }

    #[tokio::test]
    async fn test_client_trait_object() {
        let client: Arc<dyn ChatCompletionClient> = Arc::new(EchoClient {
            seen: Mutex::new(Vec::new()),
        });

        let response = client.create(vec![LlmMessage::system("ping")]).await.unwrap();
        assert_eq!(response.content.as_text(), Some("ping"));
    }

    #[test]
    fn test_roster_of_mixed_agents() {
        let mut roster = Roster::new();
        roster
            .register(Arc::new(AgentMetadata::new("Alice", "Asks")))
            .unwrap();
        roster
            .register(Arc::new(AgentMetadata::new("Bob", "Answers")))
            .unwrap();

        let names: Vec<&str> = roster.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }
}
