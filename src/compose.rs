//! Orchestration: probe, plan, render each segment in plan order, join.
//!
//! Execution is sequential: the plan is fully generated before any rendering
//! starts, each segment becomes one clip part in the workspace, and the
//! concatenation order is always plan order. Any failure aborts the run;
//! the workspace (and every intermediate clip) is removed on all exit paths,
//! and the output path is only written by a completed join.

use std::path::PathBuf;

use reveal_av::{RenderPipeline, Workspace};
use reveal_core::{Error, PlanConfig, Result};
use reveal_plan::{plan_segments, SourceKind};

/// Everything one composition run needs.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Path to the original video.
    pub original: PathBuf,
    /// Path to the modified variant.
    pub modified: PathBuf,
    /// Final output path.
    pub output: PathBuf,
    /// Planner configuration (preset + optional text card).
    pub config: PlanConfig,
    /// Seed for reproducible plans; `None` means entropy-seeded.
    pub seed: Option<u64>,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ComposeSummary {
    /// Number of planned segments (the text card is not counted).
    pub segments: usize,
    /// Number of glitch transition segments.
    pub transitions: usize,
    /// Where the joined file landed.
    pub output: PathBuf,
}

impl ComposeSummary {
    /// The one-line success message printed by the CLI.
    pub fn one_line(&self) -> String {
        format!(
            "Created video with {} segments ({} glitch transitions): {}",
            self.segments,
            self.transitions,
            self.output.display()
        )
    }
}

/// Run one composition end to end.
///
/// # Errors
///
/// Fails fast on the first problem: missing inputs
/// ([`Error::InvalidArguments`]), probe or plan failures, any segment render
/// failure, or a concatenation failure. No partial output file is left at
/// `opts.output`.
pub async fn compose(
    pipeline: &dyn RenderPipeline,
    opts: &ComposeOptions,
) -> Result<ComposeSummary> {
    for (label, path) in [("original", &opts.original), ("modified", &opts.modified)] {
        if !path.exists() {
            return Err(Error::InvalidArguments(format!(
                "{label} video does not exist: {}",
                path.display()
            )));
        }
    }

    let duration = pipeline.probe_duration(&opts.modified).await?;
    let plan = plan_segments(duration, &opts.config, opts.seed)?;
    tracing::info!(
        duration,
        segments = plan.len(),
        transitions = plan.transition_count(),
        "plan ready, rendering clips"
    );

    let mut workspace = Workspace::new()?;

    for segment in &plan {
        let part = workspace.next_part();
        if segment.is_transition {
            pipeline
                .render_transition(&opts.original, &opts.modified, segment, &part)
                .await?;
        } else {
            let input = match segment.source {
                SourceKind::Original => &opts.original,
                SourceKind::Modified => &opts.modified,
            };
            pipeline.render_segment(input, segment, &part).await?;
        }
    }

    if let Some(card) = &opts.config.text_card {
        let part = workspace.next_part();
        pipeline.render_text_card(card, &part).await?;
    }

    let joined = workspace.temp_file("joined.mp4");
    pipeline.concatenate(workspace.parts(), &joined).await?;
    workspace.persist(&joined, &opts.output)?;

    tracing::info!(output = %opts.output.display(), "done");

    Ok(ComposeSummary {
        segments: plan.len(),
        transitions: plan.transition_count(),
        output: opts.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_format() {
        let summary = ComposeSummary {
            segments: 12,
            transitions: 3,
            output: PathBuf::from("reveal_output.mp4"),
        };
        assert_eq!(
            summary.one_line(),
            "Created video with 12 segments (3 glitch transitions): reveal_output.mp4"
        );
    }
}
