//! # scout-location
//!
//! Location coverage for agent profiles.
//!
//! ## Overview
//!
//! - [`taxonomy`] loads the bundled state → county → zipcode hierarchy and
//!   derives option lists from it.
//! - [`selector::CascadingLocationSelector`] keeps the three tiers consistent
//!   as the agent (de)selects entries.
//! - [`dropdown::DropdownGroup`] tracks which picker is expanded.
//! - [`editor::ProfileLocationEditor`] loads, validates and saves the
//!   selection through a [`ProfileStore`](scout_core::traits::ProfileStore).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scout_location::{taxonomy, CascadingLocationSelector};
//! use scout_core::CascadeMode;
//!
//! let taxonomy = Arc::new(taxonomy::bundled()?);
//! let mut selector = CascadingLocationSelector::new(taxonomy, CascadeMode::Edit);
//! selector.select_states(["Texas"]);
//! ```

pub mod dropdown;
pub mod editor;
pub mod selector;
pub mod taxonomy;

pub use dropdown::{DropdownGroup, DropdownStatus};
pub use editor::{ProfileLocationEditor, Route, SubmitOutcome};
pub use selector::CascadingLocationSelector;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Instant,
    };

    use scout_contracts::{
        agent::AgentId,
        error::{ScoutError, ScoutResult},
        location::{CountyOptionKey, LocationSelection, Tier},
    };
    use scout_core::{
        config::{CascadeMode, LocationConfig},
        context::AgentContext,
        traits::ProfileStore,
    };

    use crate::{taxonomy, DropdownStatus, ProfileLocationEditor, Route, SubmitOutcome};

    // ── Mock helpers ──────────────────────────────────────────────────────────

    /// A profile store that records saves and can be told to fail.
    #[derive(Clone, Default)]
    struct MockStore {
        saved: Arc<Mutex<HashMap<AgentId, LocationSelection>>>,
        save_calls: Arc<Mutex<u32>>,
        fail_load: bool,
        fail_save: bool,
    }

    impl ProfileStore for MockStore {
        fn load_location_selection(&self, agent: &AgentId) -> ScoutResult<Option<LocationSelection>> {
            if self.fail_load {
                return Err(ScoutError::FetchFailed {
                    what: "agent profile".to_string(),
                    reason: "network unavailable".to_string(),
                });
            }
            Ok(self.saved.lock().unwrap().get(agent).cloned())
        }

        fn save_location_selection(
            &self,
            agent: &AgentId,
            selection: &LocationSelection,
        ) -> ScoutResult<()> {
            *self.save_calls.lock().unwrap() += 1;
            if self.fail_save {
                return Err(ScoutError::SaveFailed { reason: "permission denied".to_string() });
            }
            self.saved.lock().unwrap().insert(agent.clone(), selection.clone());
            Ok(())
        }
    }

    fn ctx() -> AgentContext {
        AgentContext::new(AgentId::new("agent-42"))
    }

    fn mount(store: &MockStore, mode: CascadeMode) -> ProfileLocationEditor {
        ProfileLocationEditor::mount(
            Arc::new(taxonomy::bundled().unwrap()),
            Box::new(store.clone()),
            ctx(),
            mode,
            &LocationConfig::default(),
        )
    }

    fn key(raw: &str) -> CountyOptionKey {
        CountyOptionKey::parse(raw).unwrap()
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// Submitting with no states is rejected and nothing reaches the store.
    #[test]
    fn submit_without_states_is_rejected() {
        let store = MockStore::default();
        let mut editor = mount(&store, CascadeMode::Create);

        match editor.submit() {
            SubmitOutcome::Rejected { error, alert } => {
                assert_eq!(
                    error,
                    ScoutError::Validation { reason: "Please select at least one state.".into() }
                );
                assert!(alert.message.contains("at least one state"));
                assert!(!alert.retryable);
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(*store.save_calls.lock().unwrap(), 0);
        assert!(editor.alert().is_some());
        assert!(editor.selection().is_empty());
    }

    /// A valid selection is persisted wholesale and routes home.
    #[test]
    fn submit_saves_and_routes_home() {
        let store = MockStore::default();
        let mut editor = mount(&store, CascadeMode::Create);
        editor.selector_mut().select_states(["Texas"]);
        editor.selector_mut().select_counties([key("Travis-Texas")]);
        editor.selector_mut().select_zipcodes(["78701"]);

        assert_eq!(editor.submit(), SubmitOutcome::Saved { route: Route::Home });

        let saved = store.saved.lock().unwrap();
        let selection = saved.get(&AgentId::new("agent-42")).unwrap();
        assert_eq!(selection.states, vec!["Texas"]);
        assert_eq!(selection.counties, vec![key("Travis-Texas")]);
        assert_eq!(selection.zipcodes, vec!["78701"]);
    }

    /// A failed save keeps the selection and surfaces a retryable alert.
    #[test]
    fn save_failure_keeps_selection_for_retry() {
        let store = MockStore { fail_save: true, ..MockStore::default() };
        let mut editor = mount(&store, CascadeMode::Create);
        editor.selector_mut().select_states(["Florida"]);

        match editor.submit() {
            SubmitOutcome::Failed { error, alert } => {
                assert_eq!(error, ScoutError::SaveFailed { reason: "permission denied".into() });
                assert!(alert.retryable);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(editor.selection().states, vec!["Florida"]);

        editor.dismiss_alert();
        assert!(editor.alert().is_none());
    }

    /// Edit mode restores the persisted selection on mount.
    #[test]
    fn edit_mode_loads_saved_selection() {
        let store = MockStore::default();
        store.saved.lock().unwrap().insert(
            AgentId::new("agent-42"),
            LocationSelection {
                states: vec!["California".to_string()],
                counties: vec![key("Orange-California")],
                zipcodes: vec!["92602".to_string()],
            },
        );

        let editor = mount(&store, CascadeMode::Edit);
        assert_eq!(editor.selection().counties, vec![key("Orange-California")]);
        assert_eq!(editor.selector().zipcode_options().len(), 3);
        assert!(editor.alert().is_none());
    }

    /// Create mode never reads the store.
    #[test]
    fn create_mode_starts_empty() {
        let store = MockStore { fail_load: true, ..MockStore::default() };
        let editor = mount(&store, CascadeMode::Create);
        assert!(editor.selection().is_empty());
        assert!(editor.alert().is_none());
    }

    /// A load failure leaves an empty editor with an alert.
    #[test]
    fn load_failure_sets_alert() {
        let store = MockStore { fail_load: true, ..MockStore::default() };
        let editor = mount(&store, CascadeMode::Edit);
        assert!(editor.selection().is_empty());
        let alert = editor.alert().unwrap();
        assert!(alert.retryable);
        assert!(alert.message.contains("network unavailable"));
    }

    /// Saving then re-mounting in edit mode round-trips through the store.
    #[test]
    fn saved_selection_survives_remount() {
        let store = MockStore::default();
        let mut editor = mount(&store, CascadeMode::Edit);
        editor.selector_mut().toggle_all(Tier::States);
        editor.selector_mut().select_counties([key("King-Washington")]);
        assert!(matches!(editor.submit(), SubmitOutcome::Saved { .. }));

        let reopened = mount(&store, CascadeMode::Edit);
        assert_eq!(reopened.selection().states.len(), 4);
        assert_eq!(reopened.selection().counties, vec![key("King-Washington")]);
    }

    /// Submitting collapses any expanded picker.
    #[test]
    fn submit_closes_pickers() {
        let store = MockStore::default();
        let mut editor = mount(&store, CascadeMode::Create);
        editor.selector_mut().select_states(["Texas"]);
        editor.dropdowns_mut().open(Tier::Counties, Instant::now());

        editor.submit();
        assert_eq!(editor.dropdowns().status(Tier::Counties), DropdownStatus::Closed);
    }
}
