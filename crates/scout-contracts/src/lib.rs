//! # scout-contracts
//!
//! Shared types and error definitions for the Scout agent discovery engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, boundary normalization and errors.

pub mod agent;
pub mod alert;
pub mod category;
pub mod error;
pub mod location;
