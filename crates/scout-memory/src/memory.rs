//! In-memory implementation of the store traits.
//!
//! `InMemoryBackend` stands in for the hosted document database. It keeps
//! agents, the category document and saved location profiles behind one
//! `Mutex`, and hands out cheap clones sharing that state, so a test can keep
//! a handle for inspection while a screen owns another.
//!
//! One-shot failure injection (`fail_next_fetch`, `fail_next_save`) lets
//! callers exercise the alert paths without a real network.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use scout_contracts::{
    agent::{AgentId, AgentRecord},
    category::CategoryTag,
    error::{ScoutError, ScoutResult},
    location::LocationSelection,
};
use scout_core::traits::{AgentDirectory, CategoryCatalog, ProfileStore};

// ── Stored documents ──────────────────────────────────────────────────────────

/// A persisted location profile with its write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfile {
    pub selection: LocationSelection,
    pub updated_at: DateTime<Utc>,
}

/// Shape of the single category document: `{ "categories": [..] }`.
#[derive(Debug, Deserialize)]
struct CategoryDocument {
    #[serde(default)]
    categories: Vec<String>,
}

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct InMemoryState {
    /// Agents in insertion order.
    pub(crate) agents: Vec<AgentRecord>,
    pub(crate) categories: Vec<CategoryTag>,
    pub(crate) profiles: HashMap<AgentId, SavedProfile>,
    pub(crate) fail_next_fetch: Option<String>,
    pub(crate) fail_next_save: Option<String>,
}

// ── Public backend ────────────────────────────────────────────────────────────

/// Shared in-memory document store.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // Nothing in the state can be left half-written by a panic, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace an agent. An empty id gets a fresh UUID.
    pub fn insert_agent(&self, mut record: AgentRecord) -> AgentId {
        if record.id.as_str().is_empty() {
            record.id = AgentId(Uuid::new_v4().to_string());
        }
        let id = record.id.clone();
        let mut state = self.lock();
        match state.agents.iter_mut().find(|a| a.id == id) {
            Some(existing) => *existing = record,
            None => state.agents.push(record),
        }
        debug!(agent_id = %id, "agent stored");
        id
    }

    /// Load raw agent documents and return how many were stored.
    ///
    /// Accepts either an array of documents (id taken from each document's
    /// `id` field, generated when absent) or an object mapping document id to
    /// document body. Malformed documents are skipped with a warning.
    pub fn load_agent_documents(&self, documents: Value) -> ScoutResult<usize> {
        let entries: Vec<(String, Value)> = match documents {
            Value::Array(items) => items
                .into_iter()
                .map(|doc| {
                    let id = doc
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| Uuid::new_v4().to_string());
                    (id, doc)
                })
                .collect(),
            Value::Object(map) => map.into_iter().collect(),
            _ => {
                return Err(ScoutError::MalformedDocument {
                    id: "agents".to_string(),
                    reason: "expected an array or an object of agent documents".to_string(),
                })
            }
        };

        let mut stored = 0;
        for (id, body) in entries {
            match AgentRecord::from_document(id, body) {
                Ok(record) => {
                    self.insert_agent(record);
                    stored += 1;
                }
                Err(e) => warn!(error = %e, "skipping malformed agent document"),
            }
        }
        info!(stored, "agent documents loaded");
        Ok(stored)
    }

    pub fn set_categories(&self, tags: impl IntoIterator<Item = CategoryTag>) {
        self.lock().categories = tags.into_iter().collect();
    }

    /// Load the category document (`{ "categories": [..] }`).
    pub fn load_category_document(&self, document: Value) -> ScoutResult<()> {
        let parsed: CategoryDocument =
            serde_json::from_value(document).map_err(|e| ScoutError::MalformedDocument {
                id: "categories".to_string(),
                reason: e.to_string(),
            })?;
        self.set_categories(parsed.categories.into_iter().map(CategoryTag));
        Ok(())
    }

    /// The last saved profile for `agent`, if any.
    pub fn saved_profile(&self, agent: &AgentId) -> Option<SavedProfile> {
        self.lock().profiles.get(agent).cloned()
    }

    pub fn agent_count(&self) -> usize {
        self.lock().agents.len()
    }

    /// Make the next fetch of any kind fail with `reason`.
    pub fn fail_next_fetch(&self, reason: impl Into<String>) {
        self.lock().fail_next_fetch = Some(reason.into());
    }

    /// Make the next profile save fail with `reason`.
    pub fn fail_next_save(&self, reason: impl Into<String>) {
        self.lock().fail_next_save = Some(reason.into());
    }

    fn take_fetch_failure(state: &mut InMemoryState, what: &str) -> ScoutResult<()> {
        match state.fail_next_fetch.take() {
            Some(reason) => {
                warn!(what, reason = %reason, "injected fetch failure");
                Err(ScoutError::FetchFailed { what: what.to_string(), reason })
            }
            None => Ok(()),
        }
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl AgentDirectory for InMemoryBackend {
    fn fetch_all_agents(&self) -> ScoutResult<Vec<AgentRecord>> {
        let mut state = self.lock();
        Self::take_fetch_failure(&mut state, "agents")?;
        debug!(count = state.agents.len(), "agents fetched");
        Ok(state.agents.clone())
    }
}

impl CategoryCatalog for InMemoryBackend {
    fn fetch_categories(&self) -> ScoutResult<Vec<CategoryTag>> {
        let mut state = self.lock();
        Self::take_fetch_failure(&mut state, "categories")?;
        Ok(state.categories.clone())
    }
}

impl ProfileStore for InMemoryBackend {
    fn load_location_selection(&self, agent: &AgentId) -> ScoutResult<Option<LocationSelection>> {
        let mut state = self.lock();
        Self::take_fetch_failure(&mut state, "agent profile")?;
        Ok(state.profiles.get(agent).map(|p| p.selection.clone()))
    }

    fn save_location_selection(
        &self,
        agent: &AgentId,
        selection: &LocationSelection,
    ) -> ScoutResult<()> {
        let mut state = self.lock();
        if let Some(reason) = state.fail_next_save.take() {
            warn!(agent_id = %agent, reason = %reason, "injected save failure");
            return Err(ScoutError::SaveFailed { reason });
        }
        state.profiles.insert(
            agent.clone(),
            SavedProfile { selection: selection.clone(), updated_at: Utc::now() },
        );
        info!(agent_id = %agent, "profile locations written");
        Ok(())
    }
}
