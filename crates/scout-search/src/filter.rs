//! The agent filter/match engine.
//!
//! Filtering is a pure function of `(agents, settled query, category)`:
//!
//! 1. A category other than the no-filter sentinel keeps only agents whose
//!    `specializations` contain that exact tag.
//! 2. A settled query of at least `min_query_len` characters is trimmed and
//!    lowercased, then keeps an agent if it is a substring of any coverage
//!    tag (zipcode, county, state), the full name, the legacy
//!    `specialization` or any entry of `specializations`. Case-insensitive.
//!
//! Shorter queries do not narrow the list at all. Missing fields are empty
//! and simply never match.

use tracing::debug;

use scout_contracts::{agent::AgentRecord, category::CategoryFilter};

/// Default minimum settled-query length that activates text search.
pub const MIN_QUERY_LEN: usize = 2;

/// Normalize a settled query into a search needle.
///
/// Returns `None` when the raw query is too short to search with.
pub fn normalize_query(raw: &str, min_query_len: usize) -> Option<String> {
    if raw.chars().count() < min_query_len {
        return None;
    }
    Some(raw.trim().to_lowercase())
}

/// True if `agent` passes the category step.
pub fn matches_category(agent: &AgentRecord, category: &CategoryFilter) -> bool {
    match category.tag() {
        None => true,
        Some(tag) => agent.specializations.iter().any(|s| s == tag),
    }
}

/// True if the lowercased `needle` occurs in any searchable field of `agent`.
pub fn matches_query(agent: &AgentRecord, needle: &str) -> bool {
    let hit = |value: &String| value.to_lowercase().contains(needle);

    agent.zipcodes.iter().any(hit)
        || agent.counties.iter().any(hit)
        || agent.states.iter().any(hit)
        || hit(&agent.full_name)
        || hit(&agent.specialization)
        || agent.specializations.iter().any(hit)
}

/// Filter settings shared by every recomputation on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentFilter {
    min_query_len: usize,
}

impl Default for AgentFilter {
    fn default() -> Self {
        Self { min_query_len: MIN_QUERY_LEN }
    }
}

impl AgentFilter {
    pub fn new(min_query_len: usize) -> Self {
        Self { min_query_len }
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Narrow `agents` by `category`, then by `query`. Order is preserved.
    pub fn apply<'a>(
        &self,
        agents: &'a [AgentRecord],
        query: &str,
        category: &CategoryFilter,
    ) -> Vec<&'a AgentRecord> {
        let needle = normalize_query(query, self.min_query_len);
        let filtered: Vec<&AgentRecord> = agents
            .iter()
            .filter(|agent| matches_category(agent, category))
            .filter(|agent| needle.as_deref().map_or(true, |n| matches_query(agent, n)))
            .collect();

        debug!(
            total = agents.len(),
            matched = filtered.len(),
            searching = needle.is_some(),
            category = category.tag().unwrap_or("-"),
            "agent list filtered"
        );
        filtered
    }
}
