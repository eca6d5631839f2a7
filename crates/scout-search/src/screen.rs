//! The end-user agent search screen.
//!
//! Composes the debounced query input, the category chips and the filter
//! engine over an agent list fetched once on mount:
//!
//!   keystroke → Debouncer → (quiet window) → settled query ─┐
//!   chip tap  → CategorySelector ───────────────────────────┼→ AgentFilter → filtered list
//!   fetch     → agents ─────────────────────────────────────┘
//!
//! Any input change recomputes the filtered list from scratch. Fetch
//! failures become an alert; the screen keeps whatever it showed before.

use std::time::Instant;

use tracing::{debug, info, warn};

use scout_contracts::{agent::AgentRecord, alert::Alert, category::CategoryFilter};
use scout_core::{
    config::SearchConfig,
    debounce::Debouncer,
    traits::{AgentDirectory, CategoryCatalog},
};

use crate::{category::CategorySelector, filter::AgentFilter};

pub struct AgentSearchScreen {
    filter: AgentFilter,
    agents: Vec<AgentRecord>,
    input: Debouncer<String>,
    settled_query: String,
    categories: CategorySelector,
    filtered: Vec<AgentRecord>,
    alert: Option<Alert>,
    mounted: bool,
}

impl AgentSearchScreen {
    /// Mount the screen and fetch agents and categories.
    pub fn mount(
        directory: &dyn AgentDirectory,
        catalog: &dyn CategoryCatalog,
        config: &SearchConfig,
    ) -> Self {
        let mut screen = Self {
            filter: AgentFilter::new(config.min_query_len),
            agents: Vec::new(),
            input: Debouncer::new(config.debounce()),
            settled_query: String::new(),
            categories: CategorySelector::new(config.no_filter_label.clone()),
            filtered: Vec::new(),
            alert: None,
            mounted: true,
        };

        screen.refresh(directory);
        match catalog.fetch_categories() {
            Ok(tags) => screen.categories.set_tags(tags),
            Err(e) => {
                warn!(error = %e, "failed to fetch categories");
                screen.alert = Some(Alert::from(&e));
            }
        }
        info!(agents = screen.agents.len(), "agent search mounted");
        screen
    }

    /// Re-fetch the agent list. On failure the previous list stays in place;
    /// on success any earlier alert is cleared.
    pub fn refresh(&mut self, directory: &dyn AgentDirectory) {
        if !self.mounted {
            return;
        }
        match directory.fetch_all_agents() {
            Ok(agents) => {
                self.alert = None;
                self.set_agents(agents);
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch agents");
                self.alert = Some(Alert::from(&e));
            }
        }
    }

    /// Replace the source list and recompute.
    pub fn set_agents(&mut self, agents: Vec<AgentRecord>) {
        if !self.mounted {
            return;
        }
        self.agents = agents;
        self.recompute();
    }

    /// Record a keystroke. Filtering waits for the query to settle.
    pub fn type_text(&mut self, text: impl Into<String>, now: Instant) {
        if !self.mounted {
            return;
        }
        self.input.input(text.into(), now);
    }

    /// Advance the screen's clock. Returns true if the filtered list was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        match self.input.poll(now) {
            Some(query) => {
                debug!(query = %query, "search query settled");
                self.settled_query = query;
                self.recompute();
                true
            }
            None => false,
        }
    }

    /// Tap a category chip. Recomputes immediately if the filter changed.
    pub fn tap_category(&mut self, label: &str) -> bool {
        if !self.mounted || !self.categories.tap(label) {
            return false;
        }
        self.recompute();
        true
    }

    /// Cancel pending timers. Every later call is a no-op.
    pub fn unmount(&mut self) {
        self.input.cancel();
        self.mounted = false;
        info!("agent search unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn filtered(&self) -> &[AgentRecord] {
        &self.filtered
    }

    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    /// What the text field shows: the latest keystroke, settled or not.
    pub fn raw_query(&self) -> &str {
        self.input.pending().map(String::as_str).unwrap_or("")
    }

    pub fn settled_query(&self) -> &str {
        &self.settled_query
    }

    /// When the pending keystroke will settle, for scheduling the next tick.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.input.next_deadline()
    }

    pub fn categories(&self) -> &CategorySelector {
        &self.categories
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        self.categories.active()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn recompute(&mut self) {
        self.filtered = self
            .filter
            .apply(&self.agents, &self.settled_query, self.categories.active())
            .into_iter()
            .cloned()
            .collect();
    }
}
