//! FFprobe-based duration lookup.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format` and pulls
//! the duration out of the format section. This is the only thing the
//! planner needs from the media file.

use std::path::Path;

use serde::Deserialize;

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Probe the duration of a media file, in seconds.
///
/// # Errors
///
/// - [`reveal_core::Error::Tool`] if ffprobe is missing or fails to run.
/// - [`reveal_core::Error::Probe`] if the output has no parseable duration.
/// - [`reveal_core::Error::InvalidDuration`] if the reported duration is not
///   a positive finite number.
pub async fn probe_duration(tools: &ToolRegistry, path: &Path) -> reveal_core::Result<f64> {
    let ffprobe = tools.require("ffprobe")?;

    let mut cmd = ToolCommand::new(ffprobe.path.clone());
    cmd.args(["-v", "quiet", "-print_format", "json", "-show_format"]);
    cmd.arg(path.to_string_lossy().as_ref());

    let output = cmd.execute().await?;
    let duration = parse_duration(path, &output.stdout)?;

    tracing::debug!(path = %path.display(), duration, "probed");
    Ok(duration)
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

fn parse_duration(path: &Path, stdout: &str) -> reveal_core::Result<f64> {
    let ff: FfprobeOutput = serde_json::from_str(stdout).map_err(|e| {
        reveal_core::Error::probe(
            path.to_string_lossy(),
            format!("ffprobe JSON parse error: {e}"),
        )
    })?;

    let duration = ff
        .format
        .duration
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            reveal_core::Error::probe(
                path.to_string_lossy(),
                "no duration in format section".to_string(),
            )
        })?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(reveal_core::Error::InvalidDuration(duration));
    }

    Ok(duration)
}
