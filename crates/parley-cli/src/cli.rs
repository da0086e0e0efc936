//! Command-line interface definition using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parley - pick the next speaker in a multi-agent conversation
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the agents and the conversation come from.
#[derive(Args, Debug, Clone)]
pub struct ConversationArgs {
    /// JSON file with an array of {"name", "description"} agents
    #[arg(short, long)]
    pub roster: PathBuf,

    /// JSON file with the message history (omit for an empty conversation)
    #[arg(long, conflicts_with = "memory_dir")]
    pub history: Option<PathBuf>,

    /// Read history from a persisted conversation directory instead
    /// (defaults to ~/.parley/memory when given without a value)
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub memory_dir: Option<Option<PathBuf>>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the model who should speak next
    Select {
        #[command(flatten)]
        conversation: ConversationArgs,

        /// Model identifier (overrides PARLEY_MODEL)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Print the selection prompt without calling the model
    Prompt {
        #[command(flatten)]
        conversation: ConversationArgs,
    },

    /// Count agent mentions in a piece of text
    Mentions {
        /// JSON file with an array of {"name", "description"} agents
        #[arg(short, long)]
        roster: PathBuf,

        /// Text to scan
        #[arg(required = true)]
        text: String,
    },
}

impl Cli {
    /// Tracing filter directive for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "parley_cli=info,parley_orchestrator=info",
            2 => "parley_cli=debug,parley_orchestrator=debug,parley_agent=debug,parley_memory=debug",
            _ => "trace",
        }
    }
}
