//! # scout-core
//!
//! The pieces every Scout screen shares:
//!
//! - The store traits (`AgentDirectory`, `CategoryCatalog`, `ProfileStore`)
//! - `AgentContext`, the explicit per-screen agent identity
//! - `Debouncer`, the single debounce primitive used for typed input
//! - `DiscoveryConfig`, loaded from TOML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scout_core::{config::DiscoveryConfig, debounce::Debouncer};
//!
//! let config = DiscoveryConfig::from_file(Path::new("scout.toml"))?;
//! let mut input = Debouncer::new(config.search.debounce());
//! ```

pub mod config;
pub mod context;
pub mod debounce;
pub mod traits;

pub use config::{CascadeMode, DiscoveryConfig};
pub use context::AgentContext;
pub use debounce::Debouncer;

// ── Tests ─────────────────────────────────────────────────────────────────────
