//! reveal-plan: timeline segmentation for the reveal effect.
//!
//! This crate owns the hard part of the tool: partitioning `[0, duration]`
//! into typed, timed segments subject to the three-phase source policy
//! (modified lead-in, randomized middle, original tail) with optional glitch
//! transitions at switch points. Rendering is someone else's problem; a
//! [`Plan`] is fully determined before any encoder runs.

pub mod planner;
pub mod segment;

pub use planner::plan_segments;
pub use segment::{Plan, Segment, SourceKind};
