//! TOML-driven engine configuration.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below.
//!
//! ```toml
//! [search]
//! debounce_ms = 300
//! min_query_len = 2
//! no_filter_label = "Most Recommended"
//!
//! [locations]
//! dropdown_delay_ms = 500
//! default_mode = "edit"
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use scout_contracts::{
    category::MOST_RECOMMENDED,
    error::{ScoutError, ScoutResult},
};

/// Accepted range for the search debounce window, in milliseconds.
pub const DEBOUNCE_RANGE_MS: std::ops::RangeInclusive<u64> = 300..=500;

/// Which cascade policy the location selector applies when a parent tier
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CascadeMode {
    /// First-time setup: any parent change clears all child selections.
    Create,
    /// Editing an existing profile: child selections that no longer belong to
    /// a selected parent are pruned, the rest are kept.
    #[default]
    Edit,
}

/// Search screen settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet window before a typed query settles.
    pub debounce_ms: u64,
    /// Settled queries shorter than this (in characters) do not filter.
    pub min_query_len: usize,
    /// Chip label meaning "no category restriction".
    pub no_filter_label: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
            no_filter_label: MOST_RECOMMENDED.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Location editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Artificial delay between opening a picker and it becoming interactive.
    pub dropdown_delay_ms: u64,
    pub default_mode: CascadeMode,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self { dropdown_delay_ms: 500, default_mode: CascadeMode::Edit }
    }
}

impl LocationConfig {
    pub fn dropdown_delay(&self) -> Duration {
        Duration::from_millis(self.dropdown_delay_ms)
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub search: SearchConfig,
    pub locations: LocationConfig,
}

impl DiscoveryConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `ScoutError::ConfigError` if the TOML is malformed or a value
    /// is out of range.
    pub fn from_toml_str(s: &str) -> ScoutResult<Self> {
        let config: DiscoveryConfig = toml::from_str(s).map_err(|e| ScoutError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> ScoutResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScoutError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> ScoutResult<()> {
        if !DEBOUNCE_RANGE_MS.contains(&self.search.debounce_ms) {
            return Err(ScoutError::ConfigError {
                reason: format!(
                    "search.debounce_ms must be between {} and {}, got {}",
                    DEBOUNCE_RANGE_MS.start(),
                    DEBOUNCE_RANGE_MS.end(),
                    self.search.debounce_ms
                ),
            });
        }
        if self.search.min_query_len == 0 {
            return Err(ScoutError::ConfigError {
                reason: "search.min_query_len must be at least 1".to_string(),
            });
        }
        if self.search.no_filter_label.trim().is_empty() {
            return Err(ScoutError::ConfigError {
                reason: "search.no_filter_label must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
