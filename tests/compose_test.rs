//! Orchestration tests against a recording fake pipeline.
//!
//! The fake implements [`RenderPipeline`] and records every call, so these
//! tests pin down the contract: render order follows plan order, the text
//! card is appended last, concatenation happens exactly once at the end, and
//! any failure aborts the run without touching the output path.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use reveal_av::RenderPipeline;
use reveal_core::{Error, PlanConfig, Result, TextCardConfig};
use reveal_plan::{plan_segments, Segment};
use revealcut::compose::{compose, ComposeOptions};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Probe(PathBuf),
    Segment { input: PathBuf, start: f64 },
    Transition { start: f64 },
    TextCard { message: String },
    Concat { parts: Vec<PathBuf> },
}

struct FakePipeline {
    duration: f64,
    fail_renders: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakePipeline {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            fail_renders: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(duration: f64) -> Self {
        Self {
            fail_renders: true,
            ..Self::new(duration)
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RenderPipeline for FakePipeline {
    async fn probe_duration(&self, path: &Path) -> Result<f64> {
        self.record(Call::Probe(path.to_path_buf()));
        Ok(self.duration)
    }

    async fn render_segment(
        &self,
        input: &Path,
        segment: &Segment,
        output: &Path,
    ) -> Result<()> {
        if self.fail_renders {
            return Err(Error::render("segment", "intentional failure"));
        }
        std::fs::write(output, b"clip")?;
        self.record(Call::Segment {
            input: input.to_path_buf(),
            start: segment.start,
        });
        Ok(())
    }

    async fn render_transition(
        &self,
        _original: &Path,
        _modified: &Path,
        segment: &Segment,
        output: &Path,
    ) -> Result<()> {
        if self.fail_renders {
            return Err(Error::render("transition", "intentional failure"));
        }
        std::fs::write(output, b"glitch")?;
        self.record(Call::Transition {
            start: segment.start,
        });
        Ok(())
    }

    async fn render_text_card(&self, card: &TextCardConfig, output: &Path) -> Result<()> {
        std::fs::write(output, b"card")?;
        self.record(Call::TextCard {
            message: card.message.clone(),
        });
        Ok(())
    }

    async fn concatenate(&self, parts: &[PathBuf], output: &Path) -> Result<()> {
        std::fs::write(output, b"joined")?;
        self.record(Call::Concat {
            parts: parts.to_vec(),
        });
        Ok(())
    }
}

/// Two empty but existing input files plus an output location.
struct Fixture {
    _dir: tempfile::TempDir,
    opts: ComposeOptions,
}

fn fixture(config: PlanConfig, seed: Option<u64>) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original.mp4");
    let modified = dir.path().join("modified.mp4");
    std::fs::write(&original, b"o").unwrap();
    std::fs::write(&modified, b"m").unwrap();

    Fixture {
        opts: ComposeOptions {
            original,
            modified,
            output: dir.path().join("reveal_output.mp4"),
            config,
            seed,
        },
        _dir: dir,
    }
}

#[tokio::test]
async fn renders_in_plan_order_and_concatenates_last() {
    let fx = fixture(PlanConfig::glitch(), Some(42));
    let pipeline = FakePipeline::new(10.0);

    let summary = compose(&pipeline, &fx.opts).await.unwrap();

    let calls = pipeline.calls();
    assert_eq!(calls[0], Call::Probe(fx.opts.modified.clone()));
    assert!(matches!(calls.last().unwrap(), Call::Concat { .. }));

    // Render calls mirror the plan, segment for segment, in order.
    let plan = plan_segments(10.0, &fx.opts.config, Some(42)).unwrap();
    let render_calls = &calls[1..calls.len() - 1];
    assert_eq!(render_calls.len(), plan.len());
    for (call, segment) in render_calls.iter().zip(plan.iter()) {
        match call {
            Call::Segment { start, .. } => {
                assert!(!segment.is_transition);
                assert_eq!(*start, segment.start);
            }
            Call::Transition { start } => {
                assert!(segment.is_transition);
                assert_eq!(*start, segment.start);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    // Phase A always comes from the modified source.
    match &render_calls[0] {
        Call::Segment { input, start } => {
            assert_eq!(input, &fx.opts.modified);
            assert_eq!(*start, 0.0);
        }
        other => panic!("unexpected first render {other:?}"),
    }

    assert_eq!(summary.segments, plan.len());
    assert_eq!(summary.transitions, plan.transition_count());
    assert_eq!(
        std::fs::read(&fx.opts.output).unwrap(),
        b"joined",
        "final output is the joined file"
    );
}

#[tokio::test]
async fn concat_receives_parts_in_allocation_order() {
    let fx = fixture(PlanConfig::glitch(), Some(7));
    let pipeline = FakePipeline::new(10.0);

    compose(&pipeline, &fx.opts).await.unwrap();

    let calls = pipeline.calls();
    let Call::Concat { parts } = calls.last().unwrap() else {
        panic!("expected a concat call");
    };
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(
            part.file_name().unwrap().to_string_lossy(),
            format!("part_{i:03}.mp4")
        );
    }
}

#[tokio::test]
async fn text_card_is_rendered_last_before_concat() {
    let config =
        PlanConfig::glitch().with_text_card(TextCardConfig::new("THE FIRST HALF WAS FAKE"));
    let fx = fixture(config, Some(42));
    let pipeline = FakePipeline::new(10.0);

    let summary = compose(&pipeline, &fx.opts).await.unwrap();

    let calls = pipeline.calls();
    let n = calls.len();
    assert_eq!(
        calls[n - 2],
        Call::TextCard {
            message: "THE FIRST HALF WAS FAKE".to_string()
        }
    );
    let Call::Concat { parts } = &calls[n - 1] else {
        panic!("expected a concat call");
    };
    // The card is one extra part but not counted as a segment.
    assert_eq!(parts.len(), summary.segments + 1);
}

#[tokio::test]
async fn render_failure_aborts_without_output() {
    let fx = fixture(PlanConfig::glitch(), Some(42));
    let pipeline = FakePipeline::failing(10.0);

    let result = compose(&pipeline, &fx.opts).await;
    assert!(matches!(result, Err(Error::Render { .. })));
    assert!(!fx.opts.output.exists(), "no partial output may be left");
    assert!(
        !pipeline
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Concat { .. })),
        "concatenation must not run after a failed render"
    );
}

#[tokio::test]
async fn missing_input_is_invalid_arguments() {
    let fx = fixture(PlanConfig::glitch(), Some(1));
    let mut opts = fx.opts.clone();
    opts.original = PathBuf::from("/nonexistent/original.mp4");

    let pipeline = FakePipeline::new(10.0);
    let result = compose(&pipeline, &opts).await;
    assert!(matches!(result, Err(Error::InvalidArguments(_))));
    assert!(pipeline.calls().is_empty(), "no work before validation");
}

#[tokio::test]
async fn simple_preset_never_renders_transitions() {
    let fx = fixture(PlanConfig::simple(), Some(3));
    let pipeline = FakePipeline::new(10.0);

    let summary = compose(&pipeline, &fx.opts).await.unwrap();
    assert_eq!(summary.transitions, 0);
    assert!(
        !pipeline
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Transition { .. }))
    );
}

#[tokio::test]
async fn invalid_probed_duration_fails_the_run() {
    let fx = fixture(PlanConfig::glitch(), Some(1));
    let pipeline = FakePipeline::new(-4.0);

    let result = compose(&pipeline, &fx.opts).await;
    assert!(matches!(result, Err(Error::InvalidDuration(_))));
    assert!(!fx.opts.output.exists());
}
