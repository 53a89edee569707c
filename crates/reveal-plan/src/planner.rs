//! The segment planner.
//!
//! Partitions `[0, duration]` into three phases:
//!
//! - **Phase A** `[0, duration/2)` — one segment, always Modified.
//! - **Phase B** `[duration/2, duration - tail)` — randomized alternation:
//!   segment lengths drawn uniformly from `[min_seg_len, max_seg_len]`,
//!   Modified with probability 0.7, with an optional glitch transition where
//!   the source switches.
//! - **Phase C** `[duration - tail, duration]` — always Original, preceded by
//!   one transition when the previous source differs and there is room.
//!
//! All randomness comes from one explicitly constructed [`StdRng`], drawn in
//! generation order, so a fixed seed reproduces an identical plan across runs
//! and platforms.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reveal_core::{Error, PlanConfig, Result};

use crate::segment::{Plan, Segment, SourceKind};

/// Probability that a Phase B segment keeps showing the modified source.
const MODIFIED_BIAS: f64 = 0.7;

/// Generate the ordered plan of segments for one run.
///
/// With a seed the plan is fully deterministic; without one the generator is
/// entropy-seeded and the plan is not reproducible.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] if `duration` is zero, negative, or not
/// finite. Randomness itself cannot fail.
pub fn plan_segments(duration: f64, config: &PlanConfig, seed: Option<u64>) -> Result<Plan> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::InvalidDuration(duration));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = plan_with_rng(duration, config, &mut rng);
    tracing::debug!(
        segments = plan.len(),
        transitions = plan.transition_count(),
        duration,
        "plan generated"
    );
    Ok(plan)
}

fn plan_with_rng(duration: f64, config: &PlanConfig, rng: &mut StdRng) -> Plan {
    let halfway = duration / 2.0;
    let tail_start = duration - config.tail_len;

    let mut segments = Vec::new();

    // Phase A: modified only.
    segments.push(Segment {
        start: 0.0,
        end: halfway,
        source: SourceKind::Modified,
        is_transition: false,
    });

    // Phase B: random switches. When duration <= tail_len the loop never
    // runs and the cursor stays at the halfway point.
    let mut t = halfway;
    let mut last = SourceKind::Modified;

    while t < tail_start {
        let seg_len = rng.gen_range(config.min_seg_len..=config.max_seg_len);
        let seg_end = (t + seg_len).min(tail_start);

        let source = if rng.gen::<f64>() < MODIFIED_BIAS {
            SourceKind::Modified
        } else {
            SourceKind::Original
        };

        // Glitch transition at the switch point, if it fits.
        if config.transitions_enabled && source != last && t + config.transition_len < seg_end {
            segments.push(Segment {
                start: t,
                end: t + config.transition_len,
                source,
                is_transition: true,
            });
            t += config.transition_len;
        }

        if t < seg_end {
            segments.push(Segment {
                start: t,
                end: seg_end,
                source,
                is_transition: false,
            });
        }

        t = seg_end;
        last = source;
    }

    // Phase C: original tail. The cursor, not tail_start, is the boundary so
    // a degenerate duration never produces an overlapping or negative-length
    // segment.
    if config.transitions_enabled
        && last != SourceKind::Original
        && t + config.transition_len < duration
    {
        segments.push(Segment {
            start: t,
            end: t + config.transition_len,
            source: SourceKind::Original,
            is_transition: true,
        });
        t += config.transition_len;
    }

    if t < duration {
        segments.push(Segment {
            start: t,
            end: duration,
            source: SourceKind::Original,
            is_transition: false,
        });
    }

    Plan::new(segments)
}
