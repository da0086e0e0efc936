//! Shared configuration for Parley.
//!
//! Locates Parley's state directory and the files the binary and the
//! on-disk memory store read from it.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.parley/
//! ├── config/       # .env.local with API keys
//! └── memory/       # Persisted conversation history
//! ```
//!
//! # Environment Variables
//!
//! - `PARLEY_STATE_DIR`: Override the base state directory
//! - `PARLEY_MEMORY_DIR`: Override the conversation memory directory
//! - `PARLEY_CONFIG_DIR`: Override the config directory

use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "PARLEY_STATE_DIR";

/// Environment variable for custom memory directory.
pub const MEMORY_DIR_ENV: &str = "PARLEY_MEMORY_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "PARLEY_CONFIG_DIR";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".parley";

const MEMORY_SUBDIR: &str = "memory";
const CONFIG_SUBDIR: &str = "config";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the Parley state directory.
///
/// The state directory is determined by:
/// 1. `PARLEY_STATE_DIR` environment variable if set
/// 2. `~/.parley` if home directory is available
/// 3. `.parley` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the conversation memory directory.
///
/// Defaults to `~/.parley/memory/` or `PARLEY_MEMORY_DIR` env var.
pub fn memory_dir() -> PathBuf {
    std::env::var(MEMORY_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(MEMORY_SUBDIR))
}

/// Get the user config directory.
///
/// Defaults to `~/.parley/config/` or `PARLEY_CONFIG_DIR` env var.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the .env.local file path.
///
/// Environment file for secrets (API keys).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Ensure the state directory and its subdirectories exist.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_all_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(memory_dir())?;
    std::fs::create_dir_all(config_dir())?;
    tracing::debug!(state_dir = %state_dir().display(), "State directories ready");
    Ok(())
}
