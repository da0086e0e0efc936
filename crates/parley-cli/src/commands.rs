//! Command handlers for CLI subcommands.

use std::path::Path;
use std::sync::Arc;

use parley_agent::{ModelConfig, OpenRouterClient, Roster};
use parley_core::ChatMessage;
use parley_memory::{BufferedMemory, ChatMemory, LocalMemory};
use parley_orchestrator::{compose_prompt, mentioned_agents, SpeakerSelector};
use tracing::{debug, info};

use crate::cli::{Commands, ConversationArgs};
use crate::error::{CliError, Result};

/// Execute a CLI command, returning the text to print.
pub async fn execute(command: Commands) -> Result<String> {
    match command {
        Commands::Select {
            conversation,
            model,
        } => cmd_select(&conversation, model).await,
        Commands::Prompt { conversation } => cmd_prompt(&conversation).await,
        Commands::Mentions { roster, text } => cmd_mentions(&roster, &text),
    }
}

async fn cmd_select(conversation: &ConversationArgs, model: Option<String>) -> Result<String> {
    let roster = load_roster(&conversation.roster)?;
    let memory = load_memory(conversation).await?;

    let mut config = ModelConfig::from_env();
    if let Some(model) = model {
        config.model = model;
    }
    info!(model = %config.model, agents = roster.len(), "Selecting next speaker");

    let client = OpenRouterClient::from_env(config)?;
    let selector = SpeakerSelector::new(memory, Arc::new(client));
    let speaker = selector.select_from(&roster).await?;

    Ok(speaker.name().to_string())
}

async fn cmd_prompt(conversation: &ConversationArgs) -> Result<String> {
    let roster = load_roster(&conversation.roster)?;
    let memory = load_memory(conversation).await?;
    let history = memory.get_messages().await?;

    Ok(compose_prompt(roster.agents(), &history)?)
}

fn cmd_mentions(roster: &Path, text: &str) -> Result<String> {
    let roster = load_roster(roster)?;
    let mentions = mentioned_agents(text, roster.agents())?;
    Ok(serde_json::to_string_pretty(&mentions)?)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a roster from a JSON file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let roster = Roster::from_json(&read_file(path)?)?;
    debug!(path = %path.display(), agents = roster.len(), "Loaded roster");
    Ok(roster)
}

/// Open the conversation memory the arguments point at.
///
/// A `--memory-dir` opens the persisted conversation there (or in the default
/// memory directory when no path is given). A `--history` file is loaded into
/// an in-process buffer. With neither the conversation starts empty.
pub async fn load_memory(conversation: &ConversationArgs) -> Result<Arc<dyn ChatMemory>> {
    match &conversation.memory_dir {
        Some(Some(dir)) => {
            debug!(dir = %dir.display(), "Opening persisted conversation");
            return Ok(Arc::new(LocalMemory::new(dir.clone()).await?));
        }
        Some(None) => return Ok(Arc::new(LocalMemory::default().await?)),
        None => {}
    }

    let messages: Vec<ChatMessage> = match &conversation.history {
        Some(path) => serde_json::from_str(&read_file(path)?)?,
        None => Vec::new(),
    };
    debug!(messages = messages.len(), "Loaded history");
    Ok(Arc::new(BufferedMemory::from_messages(messages)))
}
