//! reveal-core: shared error type and plan configuration.
//!
//! This crate is the foundational dependency for the other reveal-* crates,
//! providing the unified error type and the planner configuration presets.

pub mod config;
pub mod error;

// Re-export the most commonly used items at the crate root.
pub use config::{PlanConfig, TextCardConfig};
pub use error::{Error, Result};
