//! Three-tier cascading location selector.
//!
//! Selections flow top-down: states determine the county options, counties
//! determine the zipcode options. When a parent tier changes, child
//! selections are either cleared (`CascadeMode::Create`) or pruned to the
//! entries that still belong to a selected parent (`CascadeMode::Edit`).
//!
//! Input that does not correspond to an available option is dropped with a
//! warning, so `LocationSelection`'s invariants hold after every call.

use std::{collections::HashSet, hash::Hash, sync::Arc};

use tracing::{debug, warn};

use scout_contracts::location::{
    CountyOptionKey, LocationSelection, LocationTaxonomy, OptionItem, Tier,
};
use scout_core::config::CascadeMode;

use crate::taxonomy::{county_options, state_options, zipcode_options};

/// Keep the first occurrence of each value, preserving order.
fn unique<T: Eq + Hash + Clone>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

/// Dependent multi-select state over a `LocationTaxonomy`.
#[derive(Debug, Clone)]
pub struct CascadingLocationSelector {
    taxonomy: Arc<LocationTaxonomy>,
    mode: CascadeMode,
    state_options: Vec<OptionItem>,
    county_options: Vec<OptionItem>,
    zipcode_options: Vec<OptionItem>,
    selection: LocationSelection,
}

impl CascadingLocationSelector {
    /// Start with nothing selected.
    pub fn new(taxonomy: Arc<LocationTaxonomy>, mode: CascadeMode) -> Self {
        let state_options = state_options(&taxonomy);
        Self {
            taxonomy,
            mode,
            state_options,
            county_options: Vec::new(),
            zipcode_options: Vec::new(),
            selection: LocationSelection::default(),
        }
    }

    /// Start from a persisted selection.
    ///
    /// Entries that no longer exist in the taxonomy, or whose parent is not
    /// selected, are pruned regardless of `mode`.
    pub fn with_selection(
        taxonomy: Arc<LocationTaxonomy>,
        mode: CascadeMode,
        selection: LocationSelection,
    ) -> Self {
        let mut selector = Self::new(taxonomy, mode);
        let LocationSelection { states, counties, zipcodes } = selection;
        selector.apply_states(states);
        selector.apply_counties(counties);
        selector.apply_zipcodes(zipcodes);
        selector
    }

    pub fn taxonomy(&self) -> &Arc<LocationTaxonomy> {
        &self.taxonomy
    }

    pub fn mode(&self) -> CascadeMode {
        self.mode
    }

    pub fn selection(&self) -> &LocationSelection {
        &self.selection
    }

    pub fn state_options(&self) -> &[OptionItem] {
        &self.state_options
    }

    pub fn county_options(&self) -> &[OptionItem] {
        &self.county_options
    }

    pub fn zipcode_options(&self) -> &[OptionItem] {
        &self.zipcode_options
    }

    /// Options currently available at `tier`.
    pub fn options(&self, tier: Tier) -> &[OptionItem] {
        match tier {
            Tier::States => &self.state_options,
            Tier::Counties => &self.county_options,
            Tier::Zipcodes => &self.zipcode_options,
        }
    }

    /// Number of selected entries at `tier`.
    pub fn selected_len(&self, tier: Tier) -> usize {
        match tier {
            Tier::States => self.selection.states.len(),
            Tier::Counties => self.selection.counties.len(),
            Tier::Zipcodes => self.selection.zipcodes.len(),
        }
    }

    // ── Tier updates ──────────────────────────────────────────────────────────

    /// Replace the state selection and cascade to counties and zipcodes.
    pub fn select_states<I, S>(&mut self, states: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let states: Vec<String> = states.into_iter().map(Into::into).collect();
        match self.mode {
            CascadeMode::Create => {
                self.selection.counties.clear();
                self.selection.zipcodes.clear();
                self.apply_states(states);
                self.zipcode_options.clear();
            }
            CascadeMode::Edit => {
                self.apply_states(states);
                let counties = std::mem::take(&mut self.selection.counties);
                self.apply_counties(counties);
                let zipcodes = std::mem::take(&mut self.selection.zipcodes);
                self.apply_zipcodes(zipcodes);
            }
        }
        debug!(
            mode = ?self.mode,
            states = self.selection.states.len(),
            county_options = self.county_options.len(),
            counties = self.selection.counties.len(),
            zipcodes = self.selection.zipcodes.len(),
            "state selection updated"
        );
    }

    /// Replace the county selection and cascade to zipcodes.
    pub fn select_counties(&mut self, counties: impl IntoIterator<Item = CountyOptionKey>) {
        let counties: Vec<CountyOptionKey> = counties.into_iter().collect();
        match self.mode {
            CascadeMode::Create => {
                self.selection.zipcodes.clear();
                self.apply_counties(counties);
            }
            CascadeMode::Edit => {
                self.apply_counties(counties);
                let zipcodes = std::mem::take(&mut self.selection.zipcodes);
                self.apply_zipcodes(zipcodes);
            }
        }
        debug!(
            mode = ?self.mode,
            counties = self.selection.counties.len(),
            zipcode_options = self.zipcode_options.len(),
            zipcodes = self.selection.zipcodes.len(),
            "county selection updated"
        );
    }

    /// Replace the zipcode selection. Nothing cascades from here.
    pub fn select_zipcodes<I, S>(&mut self, zipcodes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply_zipcodes(zipcodes.into_iter().map(Into::into).collect());
        debug!(zipcodes = self.selection.zipcodes.len(), "zipcode selection updated");
    }

    /// The "Select All" / "Deselect All" button for `tier`.
    ///
    /// When every available option is already selected the tier is cleared,
    /// otherwise every available option is selected. Either way the change
    /// cascades like a manual selection.
    pub fn toggle_all(&mut self, tier: Tier) {
        let everything_selected = self.selected_len(tier) == self.options(tier).len();
        let values: Vec<String> = if everything_selected {
            Vec::new()
        } else {
            self.options(tier).iter().map(|o| o.value.clone()).collect()
        };

        match tier {
            Tier::States => self.select_states(values),
            Tier::Counties => {
                // Option values were built from valid keys, so parsing cannot fail.
                let keys = values.iter().filter_map(|v| CountyOptionKey::parse(v).ok());
                self.select_counties(keys.collect::<Vec<_>>());
            }
            Tier::Zipcodes => self.select_zipcodes(values),
        }
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Store `states` (filtered to known ones) and rebuild county options.
    fn apply_states(&mut self, states: Vec<String>) {
        let states: Vec<String> = unique(states)
            .into_iter()
            .filter(|s| {
                let known = self.taxonomy.state(s).is_some();
                if !known {
                    warn!(state = %s, "ignoring unknown state");
                }
                known
            })
            .collect();
        self.county_options = county_options(&self.taxonomy, &states);
        self.selection.states = states;
    }

    /// Store the counties that belong to a selected state and rebuild zipcode options.
    fn apply_counties(&mut self, counties: Vec<CountyOptionKey>) {
        let selected_states: HashSet<&str> =
            self.selection.states.iter().map(String::as_str).collect();
        let counties: Vec<CountyOptionKey> = unique(counties)
            .into_iter()
            .filter(|key| {
                let valid = selected_states.contains(key.state()) && self.taxonomy.county(key).is_some();
                if !valid {
                    debug!(county = %key, "dropping county outside selected states");
                }
                valid
            })
            .collect();
        self.zipcode_options = zipcode_options(&self.taxonomy, &counties);
        self.selection.counties = counties;
    }

    /// Store the zipcodes that belong to a selected county.
    fn apply_zipcodes(&mut self, zipcodes: Vec<String>) {
        let available: HashSet<&str> =
            self.zipcode_options.iter().map(|o| o.value.as_str()).collect();
        let zipcodes: Vec<String> = unique(zipcodes)
            .into_iter()
            .filter(|z| {
                let valid = available.contains(z.as_str());
                if !valid {
                    debug!(zipcode = %z, "dropping zipcode outside selected counties");
                }
                valid
            })
            .collect();
        self.selection.zipcodes = zipcodes;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scout_contracts::location::{CountyOptionKey, LocationSelection, Tier};
    use scout_core::config::CascadeMode;

    use super::CascadingLocationSelector;
    use crate::taxonomy;

    fn key(raw: &str) -> CountyOptionKey {
        CountyOptionKey::parse(raw).unwrap()
    }

    fn selector(mode: CascadeMode) -> CascadingLocationSelector {
        CascadingLocationSelector::new(Arc::new(taxonomy::bundled().unwrap()), mode)
    }

    fn values(options: &[scout_contracts::location::OptionItem]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    // ── Option derivation ─────────────────────────────────────────────────────

    #[test]
    fn county_options_follow_selected_states() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas"]);
        assert_eq!(
            values(s.county_options()),
            vec!["Travis-Texas", "Harris-Texas", "Orange-Texas", "Washington-Texas"]
        );

        s.select_states(["Texas", "Washington"]);
        assert_eq!(s.county_options().len(), 6);
        assert!(values(s.county_options()).contains(&"King-Washington"));
    }

    #[test]
    fn zipcode_options_follow_selected_counties() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas"), key("Harris-Texas")]);
        assert_eq!(
            values(s.zipcode_options()),
            vec!["78701", "78702", "78703", "78704", "77001", "77002", "77003"]
        );
    }

    #[test]
    fn unknown_and_orphaned_input_is_dropped() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas", "Atlantis", "Texas"]);
        assert_eq!(s.selection().states, vec!["Texas"]);

        // King belongs to Washington, which is not selected.
        s.select_counties([key("Travis-Texas"), key("King-Washington")]);
        assert_eq!(s.selection().counties, vec![key("Travis-Texas")]);

        // 77001 is Harris, not Travis.
        s.select_zipcodes(["78701", "77001"]);
        assert_eq!(s.selection().zipcodes, vec!["78701"]);
    }

    // ── Edit mode pruning ─────────────────────────────────────────────────────

    #[test]
    fn edit_mode_prunes_children_of_deselected_state() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas", "California"]);
        s.select_counties([key("Travis-Texas"), key("Orange-California")]);
        s.select_zipcodes(["78701", "92602"]);

        s.select_states(["California"]);

        assert_eq!(s.selection().counties, vec![key("Orange-California")]);
        assert_eq!(s.selection().zipcodes, vec!["92602"]);
        assert!(!values(s.zipcode_options()).contains(&"78701"));
    }

    #[test]
    fn edit_mode_keeps_children_when_state_added() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas")]);
        s.select_zipcodes(["78701"]);

        s.select_states(["Texas", "Florida"]);

        assert_eq!(s.selection().counties, vec![key("Travis-Texas")]);
        assert_eq!(s.selection().zipcodes, vec!["78701"]);
    }

    #[test]
    fn edit_mode_prunes_zipcodes_of_deselected_county() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas"), key("Harris-Texas")]);
        s.select_zipcodes(["78701", "77001"]);

        s.select_counties([key("Harris-Texas")]);
        assert_eq!(s.selection().zipcodes, vec!["77001"]);
    }

    #[test]
    fn reselecting_state_does_not_restore_pruned_entries() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas")]);
        s.select_zipcodes(["78701"]);

        s.select_states(Vec::<String>::new());
        s.select_states(["Texas"]);

        assert!(s.selection().counties.is_empty());
        assert!(s.selection().zipcodes.is_empty());
    }

    // ── Create mode clearing ──────────────────────────────────────────────────

    #[test]
    fn create_mode_clears_children_on_any_state_change() {
        let mut s = selector(CascadeMode::Create);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas")]);
        s.select_zipcodes(["78701"]);

        // Even adding a state clears everything below.
        s.select_states(["Texas", "Florida"]);

        assert_eq!(s.selection().states, vec!["Texas", "Florida"]);
        assert!(s.selection().counties.is_empty());
        assert!(s.selection().zipcodes.is_empty());
        assert!(s.zipcode_options().is_empty());
        assert_eq!(s.county_options().len(), 7);
    }

    #[test]
    fn create_mode_clears_zipcodes_on_county_change() {
        let mut s = selector(CascadeMode::Create);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas")]);
        s.select_zipcodes(["78701"]);

        s.select_counties([key("Travis-Texas"), key("Harris-Texas")]);
        assert!(s.selection().zipcodes.is_empty());
        assert_eq!(s.zipcode_options().len(), 7);
    }

    // ── Select all ────────────────────────────────────────────────────────────

    #[test]
    fn toggle_all_selects_then_clears() {
        let mut s = selector(CascadeMode::Edit);

        s.toggle_all(Tier::States);
        assert_eq!(s.selected_len(Tier::States), s.state_options().len());

        s.toggle_all(Tier::States);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn toggle_all_from_partial_selects_everything() {
        let mut s = selector(CascadeMode::Edit);
        s.select_states(["Texas"]);
        s.select_counties([key("Travis-Texas")]);

        s.toggle_all(Tier::Counties);
        assert_eq!(s.selected_len(Tier::Counties), 4);

        s.toggle_all(Tier::Zipcodes);
        assert_eq!(s.selected_len(Tier::Zipcodes), s.zipcode_options().len());
        s.toggle_all(Tier::Zipcodes);
        assert_eq!(s.selected_len(Tier::Zipcodes), 0);
        // Counties are untouched by the zipcode toggle.
        assert_eq!(s.selected_len(Tier::Counties), 4);
    }

    #[test]
    fn toggle_all_states_cascades_clear_in_edit_mode() {
        let mut s = selector(CascadeMode::Edit);
        s.toggle_all(Tier::States);
        s.select_counties([key("King-Washington")]);

        s.toggle_all(Tier::States);
        assert!(s.selection().counties.is_empty());
        assert!(s.county_options().is_empty());
    }

    // ── Restoring persisted selections ────────────────────────────────────────

    #[test]
    fn with_selection_prunes_stale_entries() {
        let persisted = LocationSelection {
            states: vec!["Texas".to_string(), "Oregon".to_string()],
            counties: vec![key("Travis-Texas"), key("Lane-Oregon")],
            zipcodes: vec!["78701".to_string(), "97401".to_string()],
        };
        let s = CascadingLocationSelector::with_selection(
            Arc::new(taxonomy::bundled().unwrap()),
            CascadeMode::Create,
            persisted,
        );

        assert_eq!(s.selection().states, vec!["Texas"]);
        assert_eq!(s.selection().counties, vec![key("Travis-Texas")]);
        assert_eq!(s.selection().zipcodes, vec!["78701"]);
        assert_eq!(s.zipcode_options().len(), 4);
    }
}
