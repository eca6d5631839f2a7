//! Scoped identity of the signed-in agent.

use scout_contracts::agent::AgentId;

/// The agent a screen acts on behalf of.
///
/// Created when a screen mounts and dropped with it. Anything that needs the
/// agent id receives this explicitly; there is no process-wide slot to read
/// it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentContext {
    agent_id: AgentId,
}

impl AgentContext {
    pub fn new(agent_id: AgentId) -> Self {
        Self { agent_id }
    }

    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }
}
