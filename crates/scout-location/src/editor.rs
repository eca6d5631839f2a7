//! The agent's location-coverage editor.
//!
//! `ProfileLocationEditor` wraps a `CascadingLocationSelector` and a
//! `DropdownGroup` with the profile store round trip:
//!
//!   mount → (load persisted selection) → edit → submit → validate → save
//!
//! Failures never escape: they are stored as an `Alert` and the editor keeps
//! its last-known-good selection so the user can retry.

use std::sync::Arc;

use tracing::{info, warn};

use scout_contracts::{
    alert::Alert,
    error::{ScoutError, ScoutResult},
    location::{LocationSelection, LocationTaxonomy},
};
use scout_core::{
    config::{CascadeMode, LocationConfig},
    context::AgentContext,
    traits::ProfileStore,
};

use crate::{dropdown::DropdownGroup, selector::CascadingLocationSelector};

/// Where the app navigates after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
}

/// Result of pressing the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; navigate to `route`.
    Saved { route: Route },
    /// The selection failed validation. Nothing was written.
    Rejected { error: ScoutError, alert: Alert },
    /// The store rejected the write. The selection is unchanged; retry is manual.
    Failed { error: ScoutError, alert: Alert },
}

/// Location preferences editor bound to one agent.
pub struct ProfileLocationEditor {
    context: AgentContext,
    store: Box<dyn ProfileStore>,
    selector: CascadingLocationSelector,
    dropdowns: DropdownGroup,
    alert: Option<Alert>,
}

impl ProfileLocationEditor {
    /// Mount the editor for `context`'s agent.
    ///
    /// In `Edit` mode the persisted selection is loaded first; a load failure
    /// leaves an empty selection and sets the alert. `Create` mode always
    /// starts empty.
    pub fn mount(
        taxonomy: Arc<LocationTaxonomy>,
        store: Box<dyn ProfileStore>,
        context: AgentContext,
        mode: CascadeMode,
        config: &LocationConfig,
    ) -> Self {
        let mut editor = Self {
            selector: CascadingLocationSelector::new(taxonomy, mode),
            dropdowns: DropdownGroup::new(config.dropdown_delay()),
            context,
            store,
            alert: None,
        };
        if mode == CascadeMode::Edit {
            editor.reload();
        }
        info!(agent_id = %editor.context.agent_id(), mode = ?mode, "location editor mounted");
        editor
    }

    /// Re-read the persisted selection, replacing any unsaved edits.
    pub fn reload(&mut self) {
        let taxonomy = Arc::clone(self.selector.taxonomy());
        let mode = self.selector.mode();
        match self.store.load_location_selection(self.context.agent_id()) {
            Ok(Some(selection)) => {
                self.selector = CascadingLocationSelector::with_selection(taxonomy, mode, selection);
                self.alert = None;
            }
            Ok(None) => {
                info!(agent_id = %self.context.agent_id(), "no saved locations for agent");
                self.alert = None;
            }
            Err(e) => {
                warn!(agent_id = %self.context.agent_id(), error = %e, "failed to load saved locations");
                self.alert = Some(Alert::from(&e));
            }
        }
    }

    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    pub fn selector(&self) -> &CascadingLocationSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut CascadingLocationSelector {
        &mut self.selector
    }

    pub fn dropdowns(&self) -> &DropdownGroup {
        &self.dropdowns
    }

    pub fn dropdowns_mut(&mut self) -> &mut DropdownGroup {
        &mut self.dropdowns
    }

    pub fn selection(&self) -> &LocationSelection {
        self.selector.selection()
    }

    /// The banner currently shown, if any.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Validate and persist the whole selection.
    pub fn submit(&mut self) -> SubmitOutcome {
        if let Err(e) = validate(self.selector.selection()) {
            warn!(agent_id = %self.context.agent_id(), error = %e, "location submit rejected");
            let alert = Alert::from(&e);
            self.alert = Some(alert.clone());
            return SubmitOutcome::Rejected { error: e, alert };
        }

        self.dropdowns.close_all();
        match self
            .store
            .save_location_selection(self.context.agent_id(), self.selector.selection())
        {
            Ok(()) => {
                let selection = self.selector.selection();
                info!(
                    agent_id = %self.context.agent_id(),
                    states = selection.states.len(),
                    counties = selection.counties.len(),
                    zipcodes = selection.zipcodes.len(),
                    "location preferences saved"
                );
                self.alert = None;
                SubmitOutcome::Saved { route: Route::Home }
            }
            Err(e) => {
                warn!(agent_id = %self.context.agent_id(), error = %e, "failed to save location preferences");
                let alert = Alert::from(&e);
                self.alert = Some(alert.clone());
                SubmitOutcome::Failed { error: e, alert }
            }
        }
    }
}

/// A selection may only be saved once at least one state is chosen.
pub fn validate(selection: &LocationSelection) -> ScoutResult<()> {
    if selection.states.is_empty() {
        return Err(ScoutError::Validation {
            reason: "Please select at least one state.".to_string(),
        });
    }
    Ok(())
}
