//! Single-select category chips.
//!
//! The chip row always starts with the no-filter label ("Most Recommended")
//! followed by the fetched tags. Tapping a chip makes it the active filter;
//! nothing cascades from it.

use std::collections::HashSet;

use tracing::{debug, warn};

use scout_contracts::category::{CategoryFilter, CategoryTag};

#[derive(Debug, Clone)]
pub struct CategorySelector {
    no_filter_label: String,
    chips: Vec<String>,
    active: CategoryFilter,
}

impl CategorySelector {
    /// A selector showing only the no-filter chip.
    pub fn new(no_filter_label: impl Into<String>) -> Self {
        let no_filter_label = no_filter_label.into();
        Self {
            chips: vec![no_filter_label.clone()],
            no_filter_label,
            active: CategoryFilter::NoFilter,
        }
    }

    /// Replace the fetched tags. Duplicates and the reserved label are skipped.
    ///
    /// If the active tag disappears, the filter falls back to no restriction.
    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = CategoryTag>) {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(self.no_filter_label.clone());

        let mut chips = vec![self.no_filter_label.clone()];
        chips.extend(
            tags.into_iter()
                .map(|t| t.0)
                .filter(|t| !t.is_empty() && seen.insert(t.clone())),
        );
        self.chips = chips;

        if let Some(tag) = self.active.tag() {
            if !self.chips.iter().any(|c| c == tag) {
                debug!(tag = %tag, "active category no longer offered, clearing filter");
                self.active = CategoryFilter::NoFilter;
            }
        }
    }

    /// Chip labels in display order, no-filter label first.
    pub fn chips(&self) -> &[String] {
        &self.chips
    }

    pub fn no_filter_label(&self) -> &str {
        &self.no_filter_label
    }

    pub fn active(&self) -> &CategoryFilter {
        &self.active
    }

    /// True if `label` is the highlighted chip.
    pub fn is_active(&self, label: &str) -> bool {
        CategoryFilter::from_label(label, &self.no_filter_label) == self.active
    }

    /// Make `label` the active filter. Returns true if the filter changed.
    ///
    /// Labels that are not on a chip are ignored.
    pub fn tap(&mut self, label: &str) -> bool {
        if !self.chips.iter().any(|c| c == label) {
            warn!(label = %label, "tapped category is not offered");
            return false;
        }
        let next = CategoryFilter::from_label(label, &self.no_filter_label);
        if next == self.active {
            return false;
        }
        debug!(label = %label, "category filter changed");
        self.active = next;
        true
    }
}
