//! User-visible alert banners.
//!
//! Failures are caught at the boundary of the operation that produced them
//! and turned into an `Alert`. The screen keeps showing its last-known-good
//! state underneath the banner until the user dismisses it.

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// A dismissable message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Short heading, e.g. "Error" or "Missing information".
    pub title: String,
    /// Body text.
    pub message: String,
    /// True when the user can re-trigger the action that failed.
    pub retryable: bool,
}

impl From<&ScoutError> for Alert {
    fn from(err: &ScoutError) -> Self {
        let title = match err {
            ScoutError::Validation { .. } => "Missing information",
            ScoutError::FetchFailed { .. } | ScoutError::SaveFailed { .. } => "Error",
            _ => "Something went wrong",
        };
        let message = match err {
            // Validation reasons are already written for the user.
            ScoutError::Validation { reason } => reason.clone(),
            other => other.to_string(),
        };
        Self {
            title: title.to_string(),
            message,
            retryable: err.is_retryable(),
        }
    }
}

impl From<ScoutError> for Alert {
    fn from(err: ScoutError) -> Self {
        Self::from(&err)
    }
}
