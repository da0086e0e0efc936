//! Error types for the command-line interface.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by `parley` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An input file is not valid JSON of the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Roster or client setup failed.
    #[error(transparent)]
    Agent(#[from] parley_agent::AgentError),

    /// Conversation memory failed.
    #[error(transparent)]
    Memory(#[from] parley_memory::MemoryError),

    /// Speaker selection failed.
    #[error(transparent)]
    Selection(#[from] parley_orchestrator::SelectionError),
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, CliError>;
