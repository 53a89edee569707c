//! revealcut: reveal-effect video synthesizer.
//!
//! Interleaves segments from two aligned source videos (an original and a
//! modified variant), inserts brief glitch transitions at switch points, and
//! concatenates the result into one output file. Planning lives in
//! `reveal-plan`, external-tool plumbing in `reveal-av`; this crate wires
//! them together.

pub mod compose;

pub use compose::{compose, ComposeOptions, ComposeSummary};
