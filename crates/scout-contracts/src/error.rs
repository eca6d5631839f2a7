//! Error types for the Scout discovery engine.
//!
//! All fallible operations return `ScoutResult<T>`. Variants carry enough
//! context to render a user-facing alert without further lookups.

use thiserror::Error;

/// The unified error type for the Scout crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoutError {
    /// User input was rejected before anything was mutated or persisted.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// A read from the external document store failed.
    #[error("failed to fetch {what}: {reason}")]
    FetchFailed { what: String, reason: String },

    /// A write to the external document store failed.
    #[error("failed to save profile: {reason}")]
    SaveFailed { reason: String },

    /// A configuration value is missing, unreadable or out of range.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The location taxonomy asset could not be parsed.
    #[error("taxonomy error: {reason}")]
    TaxonomyError { reason: String },

    /// A county option key did not have the `<county>-<state>` shape.
    #[error("malformed county key '{key}'")]
    MalformedCountyKey { key: String },

    /// A record could not be encoded for output.
    #[error("failed to encode {what}: {reason}")]
    EncodeFailed { what: String, reason: String },

    /// A fetched document could not be interpreted as a record at all.
    #[error("malformed document '{id}': {reason}")]
    MalformedDocument { id: String, reason: String },
}

impl ScoutError {
    /// Return true if re-triggering the same action may succeed.
    ///
    /// Only failures of the external store qualify; bad input and bad
    /// configuration fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed { .. } | Self::SaveFailed { .. })
    }
}

/// Convenience alias used throughout the Scout crates.
pub type ScoutResult<T> = Result<T, ScoutError>;
