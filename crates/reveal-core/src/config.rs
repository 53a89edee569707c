//! Planner configuration.
//!
//! The two historical variants of the tool (with and without glitch
//! transitions) are expressed as presets of one [`PlanConfig`] rather than
//! duplicated code paths. [`PlanConfig::glitch`] is the default.

use serde::{Deserialize, Serialize};

/// Trailing text card: a fixed-duration caption clip appended after the last
/// planned segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCardConfig {
    /// Message rendered centered on a plain background.
    pub message: String,
    /// Card duration in seconds.
    pub length: f64,
}

impl TextCardConfig {
    /// Default card duration in seconds.
    pub const DEFAULT_LENGTH: f64 = 2.0;

    /// A card showing `message` for the default duration.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            length: Self::DEFAULT_LENGTH,
        }
    }
}

/// Configuration for one planning run.
///
/// All lengths are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Emit short glitch transition segments at source switch points.
    pub transitions_enabled: bool,
    /// Minimum randomized segment length in Phase B.
    pub min_seg_len: f64,
    /// Maximum randomized segment length in Phase B.
    pub max_seg_len: f64,
    /// Length of a glitch transition segment.
    pub transition_len: f64,
    /// Duration at the end of the timeline forced to the Original source.
    pub tail_len: f64,
    /// Optional trailing text card.
    pub text_card: Option<TextCardConfig>,
}

impl PlanConfig {
    /// Glitch preset: 0.5–1.5s segments with 0.3s transitions.
    pub fn glitch() -> Self {
        Self {
            transitions_enabled: true,
            min_seg_len: 0.5,
            max_seg_len: 1.5,
            transition_len: 0.3,
            tail_len: 2.0,
            text_card: None,
        }
    }

    /// Simple preset: 0.3–1.5s segments, no transitions.
    pub fn simple() -> Self {
        Self {
            transitions_enabled: false,
            min_seg_len: 0.3,
            max_seg_len: 1.5,
            transition_len: 0.3,
            tail_len: 2.0,
            text_card: None,
        }
    }

    /// Attach a trailing text card.
    pub fn with_text_card(mut self, card: TextCardConfig) -> Self {
        self.text_card = Some(card);
        self
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::glitch()
    }
}
