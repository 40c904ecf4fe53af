// src/memory/notepad.rs — Best-effort notes sink
//
// Append-only text file the final note lands in when the user opted in.
// Failures here are reported to the caller, who logs and moves on; a
// broken notepad never rolls back a completed run.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Append seam for the optional notes sink.
pub trait NotesSink: Send + Sync {
    fn append(&self, text: &str) -> std::io::Result<()>;
}

/// Notes sink backed by a plain text file, one note block per append.
pub struct NotepadFile {
    path: PathBuf,
}

impl NotepadFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NotesSink for NotepadFile {
    fn append(&self, text: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(f, "{text}")?;
        Ok(())
    }
}
