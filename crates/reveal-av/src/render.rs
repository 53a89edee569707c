//! The render pipeline: the capability seam between planning and ffmpeg.
//!
//! [`RenderPipeline`] is the contract the orchestration code is written
//! against, so it can be unit-tested with a fake. [`FfmpegPipeline`] is the
//! real implementation. Every clip it produces (normal, transition, text
//! card) uses the same [`EncodeProfile`], which is what makes the final
//! stream-copy concatenation legal.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use reveal_core::TextCardConfig;
use reveal_plan::{Segment, SourceKind};

use crate::command::ToolCommand;
use crate::probe;
use crate::tools::ToolRegistry;

/// Alternation rate of the glitch blend, in switches per second.
const GLITCH_ALTERNATION_HZ: u32 = 20;

/// Shared output format for every clip in a run.
///
/// Resolution, frame rate, codec parameters, and the audio format must be
/// identical across clips or the concat demuxer's `-c copy` join produces
/// garbage. One profile instance is used for the whole run.
#[derive(Debug, Clone)]
pub struct EncodeProfile {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Keyframe interval in frames (`-g` / `-keyint_min`).
    pub gop: u32,
    pub preset: String,
    pub h264_profile: String,
    pub h264_level: String,
    pub audio_rate: u32,
    pub audio_channels: u32,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            width: 720,
            height: 1280,
            fps: 30,
            gop: 30,
            preset: "fast".to_string(),
            h264_profile: "high".to_string(),
            h264_level: "4.0".to_string(),
            audio_rate: 44100,
            audio_channels: 1,
        }
    }
}

impl EncodeProfile {
    /// The `-vf` chain normalizing a decoded stream to this profile.
    fn scale_filter(&self) -> String {
        format!(
            "scale={}:{},setsar=1,fps={}",
            self.width, self.height, self.fps
        )
    }

    /// Codec flags shared by every encode in a run.
    fn codec_args(&self) -> Vec<String> {
        vec![
            "-c:v".into(),
            "libx264".into(),
            "-preset".into(),
            self.preset.clone(),
            "-profile:v".into(),
            self.h264_profile.clone(),
            "-level".into(),
            self.h264_level.clone(),
            "-g".into(),
            self.gop.to_string(),
            "-keyint_min".into(),
            self.gop.to_string(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-c:a".into(),
            "aac".into(),
            "-ar".into(),
            self.audio_rate.to_string(),
            "-ac".into(),
            self.audio_channels.to_string(),
        ]
    }

    /// Silent audio source matching this profile's audio format.
    fn anullsrc_spec(&self) -> String {
        format!("anullsrc=r={}:cl=mono", self.audio_rate)
    }
}

/// The filter graph for a glitch transition: both inputs normalized, channel
/// shifted in opposite directions, noised, and blended with a rapid
/// alternation so the two sides stay visually distinguishable.
fn transition_filter(profile: &EncodeProfile) -> String {
    let scale = profile.scale_filter();
    format!(
        "[0:v]{scale},rgbashift=rh=-8:bh=8,noise=alls=30:allf=t[v0];\
         [1:v]{scale},rgbashift=rh=8:bh=-8,noise=alls=30:allf=t[v1];\
         [v0][v1]blend=all_expr='if(eq(mod(floor(T*{GLITCH_ALTERNATION_HZ}),2),0),A,B)'[v]"
    )
}

/// Stream specifier for the audio input a transition takes its track from.
/// Input 0 is the original, input 1 the modified variant.
fn audio_map(source: SourceKind) -> &'static str {
    match source {
        SourceKind::Original => "0:a",
        SourceKind::Modified => "1:a",
    }
}

/// Concat demuxer list file contents. Single quotes in paths are closed,
/// escaped, and reopened per the demuxer's quoting rules.
fn concat_list_contents(parts: &[PathBuf]) -> String {
    let mut contents = String::new();
    for part in parts {
        let escaped = part.to_string_lossy().replace('\'', "'\\''");
        contents.push_str(&format!("file '{escaped}'\n"));
    }
    contents
}

/// Capability interface between the orchestration layer and the encoder.
///
/// Implementations render one clip per call; the caller owns ordering and
/// output paths. All operations are fatal on failure — the trait has no
/// retry semantics.
#[async_trait]
pub trait RenderPipeline: Send + Sync {
    /// Report the duration of a media file in seconds.
    async fn probe_duration(&self, path: &Path) -> reveal_core::Result<f64>;

    /// Encode one normal segment: decode `input` over the segment's window,
    /// normalize to the shared profile, write to `output`.
    async fn render_segment(
        &self,
        input: &Path,
        segment: &Segment,
        output: &Path,
    ) -> reveal_core::Result<()>;

    /// Encode one glitch transition blending both sources over the segment's
    /// window. Audio follows the segment's tagged source.
    async fn render_transition(
        &self,
        original: &Path,
        modified: &Path,
        segment: &Segment,
        output: &Path,
    ) -> reveal_core::Result<()>;

    /// Produce a fixed-duration caption clip with a silent audio track.
    async fn render_text_card(
        &self,
        card: &TextCardConfig,
        output: &Path,
    ) -> reveal_core::Result<()>;

    /// Join the ordered clip list into `output` via stream copy.
    async fn concatenate(&self, parts: &[PathBuf], output: &Path) -> reveal_core::Result<()>;
}

/// [`RenderPipeline`] backed by ffmpeg, ffprobe, and ImageMagick.
pub struct FfmpegPipeline {
    tools: ToolRegistry,
    profile: EncodeProfile,
}

impl FfmpegPipeline {
    /// Create a pipeline with the default encode profile.
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            profile: EncodeProfile::default(),
        }
    }

    /// Create a pipeline with a custom encode profile.
    pub fn with_profile(tools: ToolRegistry, profile: EncodeProfile) -> Self {
        Self { tools, profile }
    }

    fn ffmpeg(&self) -> reveal_core::Result<ToolCommand> {
        let ffmpeg = self.tools.require("ffmpeg")?;
        Ok(ToolCommand::new(ffmpeg.path.clone()))
    }
}

#[async_trait]
impl RenderPipeline for FfmpegPipeline {
    async fn probe_duration(&self, path: &Path) -> reveal_core::Result<f64> {
        probe::probe_duration(&self.tools, path).await
    }

    async fn render_segment(
        &self,
        input: &Path,
        segment: &Segment,
        output: &Path,
    ) -> reveal_core::Result<()> {
        let step = format!("segment [{:.2}, {:.2})", segment.start, segment.end);
        tracing::debug!(%step, source = %segment.source, "render");

        let mut cmd = self.ffmpeg()?;
        cmd.args(["-y", "-ss", &segment.start.to_string(), "-i"]);
        cmd.arg(input.to_string_lossy().as_ref());
        cmd.args(["-t", &segment.length().to_string()]);
        cmd.args(["-vf", &self.profile.scale_filter()]);
        cmd.args(self.profile.codec_args());
        cmd.arg(output.to_string_lossy().as_ref());

        cmd.execute()
            .await
            .map_err(|e| reveal_core::Error::render(step, e.to_string()))?;
        Ok(())
    }

    async fn render_transition(
        &self,
        original: &Path,
        modified: &Path,
        segment: &Segment,
        output: &Path,
    ) -> reveal_core::Result<()> {
        let step = format!("transition [{:.2}, {:.2})", segment.start, segment.end);
        tracing::debug!(%step, source = %segment.source, "render");

        let start = segment.start.to_string();
        let length = segment.length().to_string();

        let mut cmd = self.ffmpeg()?;
        cmd.args(["-y", "-ss", &start, "-t", &length, "-i"]);
        cmd.arg(original.to_string_lossy().as_ref());
        cmd.args(["-ss", &start, "-t", &length, "-i"]);
        cmd.arg(modified.to_string_lossy().as_ref());
        cmd.args(["-filter_complex", &transition_filter(&self.profile)]);
        cmd.args(["-map", "[v]", "-map", audio_map(segment.source)]);
        cmd.args(self.profile.codec_args());
        cmd.arg(output.to_string_lossy().as_ref());

        cmd.execute()
            .await
            .map_err(|e| reveal_core::Error::render(step, e.to_string()))?;
        Ok(())
    }

    async fn render_text_card(
        &self,
        card: &TextCardConfig,
        output: &Path,
    ) -> reveal_core::Result<()> {
        tracing::debug!(message = %card.message, length = card.length, "render text card");

        // Rasterize the caption with ImageMagick, next to the output clip so
        // the workspace cleanup collects it.
        let image = output.with_extension("png");
        let magick = self.tools.imagemagick()?;
        let mut cmd = ToolCommand::new(magick.path.clone());
        cmd.args([
            "-size",
            &format!("{}x{}", self.profile.width, self.profile.height),
            "-background",
            "black",
            "-fill",
            "white",
            "-font",
            "Helvetica",
            "-pointsize",
            "48",
            "-gravity",
            "center",
        ]);
        cmd.arg(format!("caption:{}", card.message));
        cmd.arg(image.to_string_lossy().as_ref());
        cmd.execute()
            .await
            .map_err(|e| reveal_core::Error::render("text card", e.to_string()))?;

        // Loop the still for the card duration with a silent mono track.
        let length = card.length.to_string();
        let fps = self.profile.fps.to_string();
        let mut cmd = self.ffmpeg()?;
        cmd.args(["-y", "-loop", "1", "-framerate", &fps, "-t", &length, "-i"]);
        cmd.arg(image.to_string_lossy().as_ref());
        cmd.args(["-f", "lavfi", "-t", &length, "-i", &self.profile.anullsrc_spec()]);
        cmd.args(["-vf", &self.profile.scale_filter(), "-r", &fps]);
        cmd.args(self.profile.codec_args());
        cmd.arg(output.to_string_lossy().as_ref());
        cmd.execute()
            .await
            .map_err(|e| reveal_core::Error::render("text card", e.to_string()))?;

        Ok(())
    }

    async fn concatenate(&self, parts: &[PathBuf], output: &Path) -> reveal_core::Result<()> {
        if parts.is_empty() {
            return Err(reveal_core::Error::Concat("no clips to concatenate".into()));
        }

        tracing::info!(parts = parts.len(), output = %output.display(), "concatenating");

        let list_path = output.with_extension("concat.txt");
        std::fs::write(&list_path, concat_list_contents(parts))?;

        let mut cmd = self.ffmpeg()?;
        cmd.args(["-y", "-f", "concat", "-safe", "0", "-i"]);
        cmd.arg(list_path.to_string_lossy().as_ref());
        cmd.args(["-c", "copy"]);
        cmd.arg(output.to_string_lossy().as_ref());

        cmd.execute()
            .await
            .map_err(|e| reveal_core::Error::Concat(e.to_string()))?;
        Ok(())
    }
}
