//! Parley Core - types and configuration shared by every Parley crate.
//!
//! - **message**: Conversation history entries (`ChatMessage`, `TextMessage`)
//! - **config**: State directory and environment file locations

pub mod config;
pub mod message;

pub use config::{config_dir, ensure_all_dirs, env_file, memory_dir, state_dir};
pub use message::{ChatMessage, ContentPart, FunctionCall, TextMessage};
