//! Next-speaker selection.
//!
//! A selection call composes the prompt from the current history, awaits a
//! single completion, and resolves the answer to exactly one agent. There is
//! no retry, no re-prompt and no fallback to the most-mentioned agent: any
//! answer that does not name exactly one agent is returned as an error.

use std::sync::Arc;

use parley_agent::{Agent, ChatCompletionClient, Roster};
use parley_core::ChatMessage;
use parley_memory::ChatMemory;
use tracing::{debug, instrument, trace};

use crate::error::{Result, SelectionError};
use crate::mentions::mentioned_agents;
use crate::prompt::selection_request;

/// Ask `client` which of `agents` should speak next.
///
/// Reads the full history from `memory`, sends one system-level instruction
/// to `client`, and returns the agent the response names.
///
/// # Errors
/// - `EmptyRoster` if `agents` is empty
/// - `UnsupportedMessage` if the history holds a non-text message
/// - `NonTextResponse` if the model answers with function calls
/// - `Ambiguous` if the response mentions zero or several agents
/// - `Memory` / `Completion` if a collaborator fails
#[instrument(skip_all, fields(agents = agents.len()))]
pub async fn select_speaker<'a, A, M, C>(memory: &M, client: &C, agents: &'a [A]) -> Result<&'a A>
where
    A: Agent,
    M: ChatMemory + ?Sized,
    C: ChatCompletionClient + ?Sized,
{
    if agents.is_empty() {
        return Err(SelectionError::EmptyRoster);
    }

    let history = memory.get_messages().await?;
    debug!(history_len = history.len(), "Composing speaker selection prompt");
    let request = selection_request(agents, &history)?;

    debug!("Awaiting completion");
    let response = client.create(request).await?;

    let text = response
        .content
        .as_text()
        .ok_or(SelectionError::NonTextResponse {
            kind: response.content.kind(),
        })?;
    trace!(response = %text, "Resolving mentions");

    let mentions = mentioned_agents(text, agents)?;
    if mentions.len() != 1 {
        debug!(mentioned = mentions.len(), "Selection did not name exactly one agent");
        return Err(SelectionError::Ambiguous {
            mentions,
            response: text.to_string(),
        });
    }

    let name = mentions.into_keys().next().unwrap_or_default();
    let agent = agents
        .iter()
        .find(|agent| agent.name() == name)
        .ok_or(SelectionError::UnknownAgent(name))?;

    debug!(speaker = %agent.name(), "Selected next speaker");
    Ok(agent)
}

/// Speaker selection bound to one conversation's memory and a model client.
#[derive(Clone)]
pub struct SpeakerSelector {
    memory: Arc<dyn ChatMemory>,
    client: Arc<dyn ChatCompletionClient>,
}

impl SpeakerSelector {
    /// Create a selector reading from `memory` and asking `client`.
    pub fn new(memory: Arc<dyn ChatMemory>, client: Arc<dyn ChatCompletionClient>) -> Self {
        Self { memory, client }
    }

    /// The conversation memory selections read from.
    pub fn memory(&self) -> &Arc<dyn ChatMemory> {
        &self.memory
    }

    /// Append a message to the conversation.
    pub async fn record(&self, message: ChatMessage) -> Result<()> {
        self.memory.add_message(message).await?;
        Ok(())
    }

    /// Select the next speaker among `agents`.
    pub async fn select<'a, A: Agent>(&self, agents: &'a [A]) -> Result<&'a A> {
        select_speaker(self.memory.as_ref(), self.client.as_ref(), agents).await
    }

    /// Select the next speaker from a roster, returning a shared handle.
    pub async fn select_from(&self, roster: &Roster) -> Result<Arc<dyn Agent>> {
        self.select(roster.agents()).await.map(Arc::clone)
    }
}

impl std::fmt::Debug for SpeakerSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeakerSelector").finish_non_exhaustive()
    }
}
