//! Per-run staging area for intermediate clips.
//!
//! A [`Workspace`] owns a temporary directory holding the encoded clip parts
//! for one invocation. The directory is removed when the workspace is
//! dropped, on success and on failure alike, so no run can leave stray
//! intermediates behind. The final output is moved out with
//! [`Workspace::persist`] before the drop.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Staging workspace for one composition run.
pub struct Workspace {
    temp_dir: TempDir,
    parts: Vec<PathBuf>,
}

impl Workspace {
    /// Create a new empty workspace.
    pub fn new() -> reveal_core::Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| reveal_core::Error::Tool {
            tool: "workspace".to_string(),
            message: format!("failed to create temp dir: {e}"),
        })?;

        Ok(Self {
            temp_dir,
            parts: Vec::new(),
        })
    }

    /// Path to the temporary directory.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a path for a named temporary file inside the workspace.
    pub fn temp_file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Allocate the next clip part path (`part_000.mp4`, `part_001.mp4`, …)
    /// and record it in concatenation order.
    pub fn next_part(&mut self) -> PathBuf {
        let path = self.temp_file(&format!("part_{:03}.mp4", self.parts.len()));
        self.parts.push(path.clone());
        path
    }

    /// The clip parts allocated so far, in concatenation order.
    pub fn parts(&self) -> &[PathBuf] {
        &self.parts
    }

    /// Move a finished file out of the workspace to its final destination.
    ///
    /// Tries a rename first (same filesystem), falling back to copy+remove.
    /// The destination is only ever touched by a completed file, so a failed
    /// run never leaves a partial output in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the source file does not exist or if the move
    /// fails.
    pub fn persist(self, src: &Path, dest: &Path) -> reveal_core::Result<PathBuf> {
        if !src.exists() {
            return Err(reveal_core::Error::Tool {
                tool: "workspace".to_string(),
                message: format!("output file does not exist: {}", src.display()),
            });
        }

        if let Err(_rename_err) = std::fs::rename(src, dest) {
            std::fs::copy(src, dest).map_err(|e| reveal_core::Error::Tool {
                tool: "workspace".to_string(),
                message: format!("failed to copy output to destination: {e}"),
            })?;
            let _ = std::fs::remove_file(src);
        }

        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parts_are_numbered_in_order() {
        let mut ws = Workspace::new().unwrap();
        let a = ws.next_part();
        let b = ws.next_part();
        let c = ws.next_part();

        assert_eq!(a.file_name().unwrap(), "part_000.mp4");
        assert_eq!(b.file_name().unwrap(), "part_001.mp4");
        assert_eq!(c.file_name().unwrap(), "part_002.mp4");
        assert_eq!(ws.parts(), &[a, b, c]);
    }

    #[test]
    fn temp_file_inside_workspace() {
        let ws = Workspace::new().unwrap();
        let tf = ws.temp_file("concat.txt");
        assert!(tf.starts_with(ws.temp_dir()));
        assert_eq!(tf.file_name().unwrap(), "concat.txt");
    }

    #[test]
    fn persist_moves_output() {
        let dest_dir = tempfile::tempdir().unwrap();
        let dest = dest_dir.path().join("reveal_output.mp4");

        let ws = Workspace::new().unwrap();
        let joined = ws.temp_file("joined.mp4");
        fs::write(&joined, b"joined").unwrap();

        let final_path = ws.persist(&joined, &dest).unwrap();
        assert_eq!(final_path, dest);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "joined");
    }

    #[test]
    fn persist_fails_when_source_missing() {
        let dest_dir = tempfile::tempdir().unwrap();
        let dest = dest_dir.path().join("reveal_output.mp4");

        let ws = Workspace::new().unwrap();
        let joined = ws.temp_file("joined.mp4");
        // Nothing written to `joined`.
        let result = ws.persist(&joined, &dest);
        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn temp_dir_removed_on_drop() {
        let dir_path;
        {
            let mut ws = Workspace::new().unwrap();
            let part = ws.next_part();
            fs::write(&part, b"clip").unwrap();
            dir_path = ws.temp_dir().to_path_buf();
            assert!(dir_path.exists());
        }
        assert!(!dir_path.exists());
    }
}
