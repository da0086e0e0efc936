//! ChatMemory trait definition for conversation history backends.

use async_trait::async_trait;
use parley_core::ChatMessage;
use std::sync::Arc;

use crate::error::Result;

/// Trait for conversation history backends.
///
/// Implementations hold the ordered message history of a single group chat.
/// All operations take `&self` so a store can be shared behind an `Arc`;
/// implementations are responsible for their own synchronization.
#[async_trait]
pub trait ChatMemory: Send + Sync {
    /// Append a message to the end of the history.
    async fn add_message(&self, message: ChatMessage) -> Result<()>;

    /// Get the message history, oldest first.
    ///
    /// Windowed implementations may return only the most recent messages.
    async fn get_messages(&self) -> Result<Vec<ChatMessage>>;

    /// Remove every message.
    async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl<T: ChatMemory + ?Sized> ChatMemory for Arc<T> {
    async fn add_message(&self, message: ChatMessage) -> Result<()> {
        (**self).add_message(message).await
    }

    async fn get_messages(&self) -> Result<Vec<ChatMessage>> {
        (**self).get_messages().await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}
