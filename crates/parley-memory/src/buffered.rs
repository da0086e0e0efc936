//! In-process conversation memory.

use async_trait::async_trait;
use parley_core::ChatMessage;
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::{MemoryError, Result};
use crate::store::ChatMemory;

/// In-process message history with an optional read window.
///
/// Every message is retained. When a buffer size is set, `get_messages`
/// returns only the last `buffer_size` of them.
#[derive(Debug, Default)]
pub struct BufferedMemory {
    messages: RwLock<Vec<ChatMessage>>,
    buffer_size: Option<usize>,
}

impl BufferedMemory {
    /// Create an empty memory that returns the full history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty memory that returns at most `buffer_size` messages.
    ///
    /// # Errors
    /// Returns `ConfigError` if `buffer_size` is zero.
    pub fn with_buffer_size(buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(MemoryError::ConfigError(
                "buffer size must be at least 1".into(),
            ));
        }
        Ok(Self {
            messages: RwLock::new(Vec::new()),
            buffer_size: Some(buffer_size),
        })
    }

    /// Create a memory pre-seeded with `messages`.
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: RwLock::new(messages),
            buffer_size: None,
        }
    }

    /// The configured read window, if any.
    pub fn buffer_size(&self) -> Option<usize> {
        self.buffer_size
    }

    /// Total number of retained messages, ignoring the window.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Whether no messages have been recorded.
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl ChatMemory for BufferedMemory {
    async fn add_message(&self, message: ChatMessage) -> Result<()> {
        trace!(source = %message.source(), kind = message.kind(), "Recording message");
        self.messages.write().await.push(message);
        Ok(())
    }

    async fn get_messages(&self) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.read().await;
        let skip = match self.buffer_size {
            Some(size) => messages.len().saturating_sub(size),
            None => 0,
        };
        Ok(messages[skip..].to_vec())
    }

    async fn clear(&self) -> Result<()> {
        self.messages.write().await.clear();
        Ok(())
    }
}
