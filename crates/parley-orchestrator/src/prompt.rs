//! Speaker-selection prompt composition.
//!
//! The model is cast as the moderator of a role play: it sees every role with
//! its description, the conversation so far, and is asked (before and after
//! the transcript) to name exactly one role from the participant list.

use parley_agent::{Agent, LlmMessage};
use parley_core::ChatMessage;

use crate::error::{Result, SelectionError};

/// Render the history as `source: content` lines, oldest first.
///
/// # Errors
/// Returns `UnsupportedMessage` for the first entry that is not plain text.
pub fn render_history(history: &[ChatMessage]) -> Result<String> {
    let lines = history
        .iter()
        .enumerate()
        .map(|(index, message)| {
            message
                .as_text()
                .map(|text| format!("{}: {}", text.source, text.content))
                .ok_or(SelectionError::UnsupportedMessage {
                    index,
                    kind: message.kind(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(lines.join("\n"))
}

/// Render one `name: description` line per agent.
///
/// Lines are trimmed, so an agent with an empty description renders as
/// `name:`.
pub fn render_roles<A: Agent>(agents: &[A]) -> String {
    agents
        .iter()
        .map(|agent| {
            format!("{}: {}", agent.name(), agent.description())
                .trim()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the agent names as a bracketed, quoted list: `["Alice", "Bob"]`.
pub fn render_participants<A: Agent>(agents: &[A]) -> String {
    let names: Vec<&str> = agents.iter().map(|agent| agent.name()).collect();
    format!("{:?}", names)
}

/// Compose the full selection instruction.
///
/// # Errors
/// - `EmptyRoster` if `agents` is empty
/// - `UnsupportedMessage` if the history contains a non-text message
pub fn compose_prompt<A: Agent>(agents: &[A], history: &[ChatMessage]) -> Result<String> {
    if agents.is_empty() {
        return Err(SelectionError::EmptyRoster);
    }

    let history = render_history(history)?;
    let roles = render_roles(agents);
    let participants = render_participants(agents);

    Ok(format!(
        "You are in a role play game. The following roles are available:
{roles}.
Read the following conversation. Then select the next role from {participants} to play. Only return the role.

{history}

Read the above conversation. Then select the next role from {participants} to play. Only return the role.
"
    ))
}

/// The completion request for a selection: a single system message.
pub fn selection_request<A: Agent>(
    agents: &[A],
    history: &[ChatMessage],
) -> Result<Vec<LlmMessage>> {
    Ok(vec![LlmMessage::system(compose_prompt(agents, history)?)])
}
