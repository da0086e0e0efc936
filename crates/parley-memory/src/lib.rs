//! Conversation history stores for Parley group chats.
//!
//! Every backend implements [`ChatMemory`], the interface the speaker
//! selector reads history through:
//!
//! - **BufferedMemory**: In-process history with an optional read window
//! - **LocalMemory**: JSON file on disk, reloaded on startup
//!
//! # Example
//!
//! ```no_run
//! use parley_core::ChatMessage;
//! use parley_memory::{BufferedMemory, ChatMemory};
//!
//! # async fn example() -> parley_memory::Result<()> {
//! let memory = BufferedMemory::new();
//! memory.add_message(ChatMessage::text("Alice", "Hello")).await?;
//!
//! for message in memory.get_messages().await? {
//!     println!("{}: {:?}", message.source(), message.as_text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod buffered;
pub mod error;
pub mod local;
pub mod store;

pub use buffered::BufferedMemory;
pub use error::{MemoryError, Result};
pub use local::{LocalMemory, StoredMessage};
pub use store::ChatMemory;

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ChatMessage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_shared_memory_through_trait_object() {
        let memory: Arc<dyn ChatMemory> = Arc::new(BufferedMemory::new());
        let writer = Arc::clone(&memory);

        writer.add_message(ChatMessage::text("Alice", "Hello")).await.unwrap();

        let messages = memory.get_messages().await.unwrap();
        assert_eq!(messages, vec![ChatMessage::text("Alice", "Hello")]);
    }
}
