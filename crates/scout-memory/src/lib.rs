//! # scout-memory
//!
//! In-memory document store for Scout.
//!
//! `InMemoryBackend` implements `AgentDirectory`, `CategoryCatalog` and
//! `ProfileStore` over plain collections so the search screen and the
//! location editor can run without a hosted database. `fixtures` provides
//! fictional agent and category documents.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scout_memory::fixtures;
//! use scout_search::AgentSearchScreen;
//!
//! let backend = fixtures::seeded_backend()?;
//! let screen = AgentSearchScreen::mount(&backend, &backend, &config.search);
//! ```

pub mod fixtures;
pub mod memory;

pub use memory::{InMemoryBackend, SavedProfile};

// ── Tests ─────────────────────────────────────────────────────────────────────
