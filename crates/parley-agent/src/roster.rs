//! Ordered agent table keyed by name.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use crate::agent::{Agent, AgentMetadata};
use crate::error::{AgentError, Result};

/// The agents eligible to speak in a group chat.
///
/// Preserves registration order (which is the order agents are listed to the
/// model) and rejects duplicate names on insertion, so a name always resolves
/// to exactly one agent.
#[derive(Clone, Default)]
pub struct Roster {
    agents: Vec<Arc<dyn Agent>>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from plain metadata, in order.
    pub fn from_metadata(agents: impl IntoIterator<Item = AgentMetadata>) -> Result<Self> {
        let mut roster = Self::new();
        for agent in agents {
            roster.register(Arc::new(agent))?;
        }
        Ok(roster)
    }

    /// Parse a JSON array of `{ "name", "description" }` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let agents: Vec<AgentMetadata> = serde_json::from_str(json)?;
        Self::from_metadata(agents)
    }

    /// Add an agent at the end of the roster.
    ///
    /// # Errors
    /// - `InvalidAgentName` if the name is empty
    /// - `DuplicateAgent` if an agent with the same name is registered
    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Result<()> {
        let name = agent.name().to_string();
        if name.is_empty() {
            return Err(AgentError::InvalidAgentName(name));
        }
        if self.index.contains_key(&name) {
            return Err(AgentError::DuplicateAgent(name));
        }

        debug!(agent = %name, position = self.agents.len(), "Registering agent");
        self.index.insert(name, self.agents.len());
        self.agents.push(agent);
        Ok(())
    }

    /// Look up an agent by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Agent>> {
        self.index.get(name).map(|&i| &self.agents[i])
    }

    /// Whether an agent with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Agents in registration order.
    pub fn agents(&self) -> &[Arc<dyn Agent>] {
        &self.agents
    }

    /// Agent names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }
}

impl Deref for Roster {
    type Target = [Arc<dyn Agent>];

    fn deref(&self) -> &Self::Target {
        &self.agents
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster").field("agents", &self.names()).finish()
    }
}
