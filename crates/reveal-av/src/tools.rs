//! External tool detection and management.
//!
//! The [`ToolRegistry`] discovers and caches the locations of the external
//! CLI tools revealcut shells out to (ffmpeg, ffprobe, ImageMagick) and
//! provides lookup methods for the rest of the crate.

use std::collections::HashMap;
use std::path::PathBuf;

/// Known tool names that the registry manages. ImageMagick appears twice
/// because v7 installs `magick` while v6 installs `convert`.
const KNOWN_TOOLS: &[&str] = &["ffmpeg", "ffprobe", "magick", "convert"];

/// Configuration for a single external tool.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Human-readable tool name (e.g. "ffmpeg").
    pub name: String,
    /// Resolved path to the executable.
    pub path: PathBuf,
}

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of `-version`/`--version` output), if
    /// available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool configurations.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Discover tools by searching `PATH` via [`which::which`]. Tools that
    /// are not found are silently omitted; [`require`](Self::require) reports
    /// the miss when something actually needs them.
    pub fn discover() -> Self {
        let mut tools = HashMap::new();

        for &name in KNOWN_TOOLS {
            if let Ok(path) = which::which(name) {
                tools.insert(
                    name.to_string(),
                    ToolConfig {
                        name: name.to_string(),
                        path,
                    },
                );
            }
        }

        Self { tools }
    }

    /// Return a reference to the [`ToolConfig`] for the given tool, or a
    /// [`reveal_core::Error::Tool`] if the tool was not found during
    /// discovery.
    pub fn require(&self, name: &str) -> reveal_core::Result<&ToolConfig> {
        self.tools.get(name).ok_or_else(|| reveal_core::Error::Tool {
            tool: name.to_string(),
            message: format!("{name} not found; is it installed and in PATH?"),
        })
    }

    /// The ImageMagick binary: `magick` (v7), falling back to `convert` (v6).
    pub fn imagemagick(&self) -> reveal_core::Result<&ToolConfig> {
        self.tools
            .get("magick")
            .or_else(|| self.tools.get("convert"))
            .ok_or_else(|| reveal_core::Error::Tool {
                tool: "magick".to_string(),
                message: "ImageMagick not found (neither `magick` nor `convert` is in PATH)"
                    .to_string(),
            })
    }

    /// Check all known tools and return availability information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        KNOWN_TOOLS
            .iter()
            .map(|&name| {
                if let Some(cfg) = self.tools.get(name) {
                    let version = detect_version(name, &cfg.path);
                    ToolInfo {
                        name: name.to_string(),
                        available: true,
                        version,
                        path: Some(cfg.path.clone()),
                    }
                } else {
                    ToolInfo {
                        name: name.to_string(),
                        available: false,
                        version: None,
                        path: None,
                    }
                }
            })
            .collect()
    }
}

/// Run `<tool> --version` (or `-version` for ffmpeg/ffprobe) and return the
/// first line of stdout.
fn detect_version(name: &str, path: &PathBuf) -> Option<String> {
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };

    let output = std::process::Command::new(path)
        .arg(version_arg)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
}
