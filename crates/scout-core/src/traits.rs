//! Contracts for the external document store.
//!
//! The discovery engine never talks to the store directly. Screens and the
//! profile editor receive implementations of these traits and only consume
//! their resolved results:
//!
//! - `AgentDirectory`: "fetch all agents", no parameters, no pagination
//! - `CategoryCatalog`: the single document holding specialization tags
//! - `ProfileStore`: load and save an agent's location coverage

use scout_contracts::{
    agent::{AgentId, AgentRecord},
    category::CategoryTag,
    error::ScoutResult,
    location::LocationSelection,
};

/// Source of the raw agent list the search screen narrows.
pub trait AgentDirectory: Send + Sync {
    /// Return every agent profile, already normalized to `AgentRecord`.
    ///
    /// The engine does not re-query when filters change; it calls this on
    /// mount and on an explicit refresh only.
    fn fetch_all_agents(&self) -> ScoutResult<Vec<AgentRecord>>;
}

/// Source of the selectable specialization tags.
pub trait CategoryCatalog: Send + Sync {
    fn fetch_categories(&self) -> ScoutResult<Vec<CategoryTag>>;
}

/// Persistence for an agent's location coverage preferences.
pub trait ProfileStore: Send + Sync {
    /// Load the persisted selection, or `None` if the agent never saved one.
    fn load_location_selection(&self, agent: &AgentId) -> ScoutResult<Option<LocationSelection>>;

    /// Replace the agent's persisted selection wholesale.
    fn save_location_selection(
        &self,
        agent: &AgentId,
        selection: &LocationSelection,
    ) -> ScoutResult<()>;
}
