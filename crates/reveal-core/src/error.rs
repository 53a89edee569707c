//! Unified error type for revealcut.
//!
//! Every failure from planning, probing, rendering, and concatenation funnels
//! into [`Error`]. There are no retries anywhere: an external tool failure is
//! fatal to the whole run, since a garbled media file is worse than none.

/// Unified error type covering all failure modes in revealcut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The probed media duration was zero, negative, or not a number.
    #[error("invalid duration: {0}")]
    InvalidDuration(f64),

    /// Duration lookup on a source file failed.
    #[error("probe failed [{path}]: {message}")]
    Probe {
        /// The file that was being probed.
        path: String,
        /// Human-readable error description.
        message: String,
    },

    /// A segment's encode step failed.
    #[error("render failed [{step}]: {message}")]
    Render {
        /// The render step that failed (e.g. "segment 3", "text card").
        step: String,
        /// Human-readable error description.
        message: String,
    },

    /// The final stream-copy join failed or the clip formats diverged.
    #[error("concatenation failed: {0}")]
    Concat(String),

    /// CLI misuse or unusable inputs.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An external tool (ffmpeg, ffprobe, magick) could not be run.
    #[error("tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Probe`].
    pub fn probe(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Render`].
    pub fn render(step: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Render {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_duration_display() {
        let err = Error::InvalidDuration(-1.5);
        assert_eq!(err.to_string(), "invalid duration: -1.5");
    }

    #[test]
    fn probe_display() {
        let err = Error::probe("clip.mp4", "no duration in format section");
        assert_eq!(
            err.to_string(),
            "probe failed [clip.mp4]: no duration in format section"
        );
    }

    #[test]
    fn render_display() {
        let err = Error::render("segment 3", "ffmpeg exited with status 1");
        assert_eq!(
            err.to_string(),
            "render failed [segment 3]: ffmpeg exited with status 1"
        );
    }

    #[test]
    fn concat_display() {
        let err = Error::Concat("stream parameters diverge".into());
        assert_eq!(err.to_string(), "concatenation failed: stream parameters diverge");
    }

    #[test]
    fn invalid_arguments_display() {
        let err = Error::InvalidArguments("original video does not exist".into());
        assert_eq!(
            err.to_string(),
            "invalid arguments: original video does not exist"
        );
    }

    #[test]
    fn tool_display() {
        let err = Error::tool("ffmpeg", "failed to spawn");
        assert_eq!(err.to_string(), "tool error [ffmpeg]: failed to spawn");
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn result_alias() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);
    }
}
