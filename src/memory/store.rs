// src/memory/store.rs — Whole-document JSON snapshot store
//
// The snapshot is read and overwritten wholesale: no partial merge, no
// locking, no schema versioning. Concurrent runs against one store are
// out of scope; callers serialize.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::types::MemorySnapshot;
use crate::infra::errors::DistillError;
use crate::infra::paths;

/// Load/save seam for the persisted memory snapshot.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<MemorySnapshot, DistillError>;
    fn save(&self, snapshot: &MemorySnapshot) -> Result<(), DistillError>;
}

/// Snapshot store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default data-dir location (`memory.json`).
    pub fn open_default() -> Self {
        Self::new(paths::memory_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the snapshot file. Missing file is fine.
    pub fn clear(&self) -> Result<(), DistillError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    /// Missing file yields an empty snapshot. A file that no longer
    /// parses also yields an empty snapshot (with a warning) so a
    /// damaged memory file never blocks a run.
    fn load(&self) -> Result<MemorySnapshot, DistillError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(MemorySnapshot::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                tracing::warn!(
                    "Memory file {} is unreadable ({e}); starting with empty memory",
                    self.path.display()
                );
                Ok(MemorySnapshot::new())
            }
        }
    }

    /// Atomic whole-document write: temp file + rename.
    fn save(&self, snapshot: &MemorySnapshot) -> Result<(), DistillError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| DistillError::Config(format!("snapshot serialization failed: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(json.as_bytes())?;
        f.flush()?;
        f.sync_all()?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
