//! # scout-search
//!
//! Client-side agent discovery: narrow an in-memory agent list by a
//! debounced free-text query and a single specialization category.
//!
//! - [`filter::AgentFilter`] is the pure match engine.
//! - [`category::CategorySelector`] owns the chip row.
//! - [`screen::AgentSearchScreen`] wires both to a [`Debouncer`](scout_core::Debouncer)
//!   and the store traits.

pub mod category;
pub mod filter;
pub mod screen;

pub use category::CategorySelector;
pub use filter::AgentFilter;
pub use screen::AgentSearchScreen;

// ── Tests ─────────────────────────────────────────────────────────────────────
