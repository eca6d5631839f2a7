//! Specialization categories used to narrow the agent list.

use serde::{Deserialize, Serialize};

/// The reserved chip label meaning "no category restriction".
pub const MOST_RECOMMENDED: &str = "Most Recommended";

/// A specialization tag from the fetched category list (e.g. "Buyer Agent").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryTag(pub String);

impl CategoryTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The active category restriction on the search screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every agent passes the category step.
    #[default]
    NoFilter,
    /// Only agents whose `specializations` contain this exact tag pass.
    Tag(String),
}

impl CategoryFilter {
    /// Interpret a chip label, treating `no_filter_label` and the empty
    /// string as the sentinel.
    pub fn from_label(label: &str, no_filter_label: &str) -> Self {
        if label.is_empty() || label == no_filter_label {
            Self::NoFilter
        } else {
            Self::Tag(label.to_string())
        }
    }

    /// The restricting tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::NoFilter => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}
