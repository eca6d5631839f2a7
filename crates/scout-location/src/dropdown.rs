//! Picker expansion state for the three location tiers.
//!
//! Only one picker is expanded at a time: opening a tier closes the other
//! two. A freshly opened picker shows a loading indicator for a fixed delay
//! before it becomes interactive, which gives large option lists time to
//! render. The delay is a UX throttle; nothing depends on it for correctness.

use std::time::{Duration, Instant};

use tracing::debug;

use scout_contracts::location::Tier;

/// Expansion state of one picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownStatus {
    Closed,
    /// Opened, showing a spinner until `ready_at`.
    Loading { ready_at: Instant },
    Open,
}

/// Mutually exclusive pickers for states, counties and zipcodes.
#[derive(Debug, Clone)]
pub struct DropdownGroup {
    delay: Duration,
    statuses: [DropdownStatus; 3],
}

fn slot(tier: Tier) -> usize {
    match tier {
        Tier::States => 0,
        Tier::Counties => 1,
        Tier::Zipcodes => 2,
    }
}

impl DropdownGroup {
    pub fn new(delay: Duration) -> Self {
        Self { delay, statuses: [DropdownStatus::Closed; 3] }
    }

    pub fn status(&self, tier: Tier) -> DropdownStatus {
        self.statuses[slot(tier)]
    }

    /// True once the picker for `tier` is open and past its loading delay.
    pub fn is_interactive(&self, tier: Tier) -> bool {
        self.status(tier) == DropdownStatus::Open
    }

    /// The tier whose picker is expanded (loading or open), if any.
    pub fn expanded(&self) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|t| self.status(*t) != DropdownStatus::Closed)
    }

    /// Expand `tier`, collapsing the others, and restart its loading delay.
    pub fn open(&mut self, tier: Tier, now: Instant) {
        self.statuses = [DropdownStatus::Closed; 3];
        let status = if self.delay.is_zero() {
            DropdownStatus::Open
        } else {
            DropdownStatus::Loading { ready_at: now + self.delay }
        };
        self.statuses[slot(tier)] = status;
        debug!(tier = %tier, delay_ms = self.delay.as_millis() as u64, "picker opened");
    }

    pub fn close(&mut self, tier: Tier) {
        self.statuses[slot(tier)] = DropdownStatus::Closed;
    }

    pub fn close_all(&mut self) {
        self.statuses = [DropdownStatus::Closed; 3];
    }

    /// Open `tier` if it is closed, otherwise close it.
    pub fn toggle(&mut self, tier: Tier, now: Instant) {
        if self.status(tier) == DropdownStatus::Closed {
            self.open(tier, now);
        } else {
            self.close(tier);
        }
    }

    /// Finish a pending loading delay. Returns the tier that became interactive.
    pub fn poll(&mut self, now: Instant) -> Option<Tier> {
        for tier in Tier::ALL {
            if let DropdownStatus::Loading { ready_at } = self.status(tier) {
                if now >= ready_at {
                    self.statuses[slot(tier)] = DropdownStatus::Open;
                    return Some(tier);
                }
            }
        }
        None
    }
}
