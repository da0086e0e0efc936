//! Local file-based conversation memory.
//!
//! Persists the history of one group chat to a JSON file so a conversation
//! survives process restarts. The full history is kept in memory and the file
//! is rewritten on every change, which is fine for chat-sized histories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parley_core::ChatMessage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::ChatMemory;

const HISTORY_FILE: &str = "history.json";

/// A message as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    /// The recorded message.
    pub message: ChatMessage,

    /// When the message was added to the store.
    pub recorded_at: DateTime<Utc>,
}

/// Local file-based conversation memory.
pub struct LocalMemory {
    /// Path to the storage directory.
    storage_dir: PathBuf,
    /// In-memory copy of the history, oldest first.
    records: RwLock<Vec<StoredMessage>>,
}

impl LocalMemory {
    /// Create a memory stored under `storage_dir`, loading any existing history.
    pub async fn new(storage_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&storage_dir)?;

        let memory = Self {
            storage_dir,
            records: RwLock::new(Vec::new()),
        };

        memory.load().await?;
        Ok(memory)
    }

    /// Create a memory in the default Parley memory directory.
    pub async fn default() -> Result<Self> {
        parley_core::ensure_all_dirs()?;
        let path = parley_core::memory_dir();
        info!(path = %path.display(), "Initializing local conversation memory");
        Self::new(path).await
    }

    /// Directory the history file lives in.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// All stored records, including timestamps.
    pub async fn records(&self) -> Vec<StoredMessage> {
        self.records.read().await.clone()
    }

    fn data_file(&self) -> PathBuf {
        self.storage_dir.join(HISTORY_FILE)
    }

    async fn load(&self) -> Result<()> {
        let file = self.data_file();
        if !file.exists() {
            debug!(path = %file.display(), "No existing history file");
            return Ok(());
        }

        let data = std::fs::read_to_string(&file)?;
        let loaded: Vec<StoredMessage> = serde_json::from_str(&data)?;

        let mut records = self.records.write().await;
        *records = loaded;

        info!(count = records.len(), "Loaded conversation history from disk");
        Ok(())
    }

    /// Write `records` to disk. Callers commit them to memory only on success.
    fn save(&self, records: &[StoredMessage]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        // Atomic write via temp file
        let file = self.data_file();
        let temp_file = file.with_extension("json.tmp");
        std::fs::write(&temp_file, json)?;
        std::fs::rename(&temp_file, &file)?;

        debug!(count = records.len(), "Saved conversation history to disk");
        Ok(())
    }
}

#[async_trait]
impl ChatMemory for LocalMemory {
    async fn add_message(&self, message: ChatMessage) -> Result<()> {
        let mut records = self.records.write().await;
        debug!(source = %message.source(), kind = message.kind(), "Storing message");

        let mut updated = records.clone();
        updated.push(StoredMessage {
            message,
            recorded_at: Utc::now(),
        });
        self.save(&updated)?;

        *records = updated;
        Ok(())
    }

    async fn get_messages(&self) -> Result<Vec<ChatMessage>> {
        let records = self.records.read().await;
        Ok(records.iter().map(|r| r.message.clone()).collect())
    }

    async fn clear(&self) -> Result<()> {
        let mut records = self.records.write().await;
        self.save(&[])?;
        records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_memory() -> (LocalMemory, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let memory = LocalMemory::new(temp_dir.path().to_path_buf()).await.unwrap();
        (memory, temp_dir)
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let (memory, _dir) = create_test_memory().await;

        memory.add_message(ChatMessage::text("Alice", "Hello")).await.unwrap();
        memory.add_message(ChatMessage::text("Bob", "Hi")).await.unwrap();

        let messages = memory.get_messages().await.unwrap();
        assert_eq!(
            messages,
            vec![ChatMessage::text("Alice", "Hello"), ChatMessage::text("Bob", "Hi")]
        );
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_path_buf();

        {
            let memory = LocalMemory::new(path.clone()).await.unwrap();
            memory.add_message(ChatMessage::text("Alice", "persisted")).await.unwrap();
        }

        let reopened = LocalMemory::new(path).await.unwrap();
        let messages = reopened.get_messages().await.unwrap();
        assert_eq!(messages, vec![ChatMessage::text("Alice", "persisted")]);

        let records = reopened.records().await;
        assert!(records[0].recorded_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_clear_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_path_buf();

        let memory = LocalMemory::new(path.clone()).await.unwrap();
        memory.add_message(ChatMessage::text("Alice", "gone soon")).await.unwrap();
        memory.clear().await.unwrap();

        let reopened = LocalMemory::new(path).await.unwrap();
        assert!(reopened.get_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_add_leaves_history_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chat");
        let memory = LocalMemory::new(path.clone()).await.unwrap();
        memory.add_message(ChatMessage::text("Alice", "kept")).await.unwrap();

        std::fs::remove_dir_all(&path).unwrap();

        let result = memory.add_message(ChatMessage::text("Alice", "lost")).await;
        assert!(matches!(result, Err(crate::error::MemoryError::IoError(_))));
        assert_eq!(
            memory.get_messages().await.unwrap(),
            vec![ChatMessage::text("Alice", "kept")]
        );

        // Retrying once the directory is back stores the message exactly once
        std::fs::create_dir_all(&path).unwrap();
        memory.add_message(ChatMessage::text("Alice", "lost")).await.unwrap();

        let reopened = LocalMemory::new(path).await.unwrap();
        assert_eq!(
            reopened.get_messages().await.unwrap(),
            vec![ChatMessage::text("Alice", "kept"), ChatMessage::text("Alice", "lost")]
        );
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_history() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chat");
        let memory = LocalMemory::new(path.clone()).await.unwrap();
        memory.add_message(ChatMessage::text("Bob", "still here")).await.unwrap();

        std::fs::remove_dir_all(&path).unwrap();

        assert!(memory.clear().await.is_err());
        assert_eq!(
            memory.get_messages().await.unwrap(),
            vec![ChatMessage::text("Bob", "still here")]
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(HISTORY_FILE), "not json").unwrap();

        let result = LocalMemory::new(temp_dir.path().to_path_buf()).await;
        assert!(matches!(
            result,
            Err(crate::error::MemoryError::SerializationError(_))
        ));
    }
}
