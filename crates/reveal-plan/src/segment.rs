//! Segment and plan value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which source video a segment is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The untouched source.
    Original,
    /// The altered variant being revealed.
    Modified,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Original => write!(f, "original"),
            SourceKind::Modified => write!(f, "modified"),
        }
    }
}

/// A time-bounded, source-tagged unit of the output timeline.
///
/// Segments are contiguous and non-overlapping within a [`Plan`]; in order
/// they cover `[0, total_duration]` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds, relative to the source timeline.
    pub start: f64,
    /// End time in seconds (exclusive).
    pub end: f64,
    /// Source this segment is cut from. For transitions this is the source
    /// being switched *to*; its audio track follows this tag.
    pub source: SourceKind,
    /// Whether this is a short glitch transition blending both sources.
    pub is_transition: bool,
}

impl Segment {
    /// Segment length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// The complete ordered list of segments for one run.
///
/// Built once per invocation, immutable afterwards; each segment is consumed
/// exactly once by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    segments: Vec<Segment>,
}

impl Plan {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The segments in render/concatenation order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (transitions included).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the plan is empty. Never true for a valid duration.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of glitch transition segments.
    pub fn transition_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_transition).count()
    }

    /// Sum of all segment lengths. Equals the total duration for a valid plan.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Iterate over segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
