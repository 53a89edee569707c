//! # reveal-av
//!
//! External-tool plumbing for revealcut: everything that shells out.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg,
//!   ffprobe, and ImageMagick.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Workspace management** ([`Workspace`]) -- temporary clip staging with
//!   atomic persistence of the final output.
//! - **Duration probing** ([`probe::probe_duration`]) -- ffprobe JSON.
//! - **Render pipeline** ([`RenderPipeline`], [`FfmpegPipeline`]) -- the
//!   capability trait the planner-side code is written against, and its
//!   ffmpeg-backed implementation.

pub mod command;
pub mod probe;
pub mod render;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use render::{EncodeProfile, FfmpegPipeline, RenderPipeline};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
pub use workspace::Workspace;
