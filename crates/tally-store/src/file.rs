use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use tally_types::Obligation;

use crate::error::{StoreError, StoreResult};
use crate::format;
use crate::traits::SnapshotStore;

/// Snapshot store backed by a single flat file.
///
/// Loads read the whole file and parse it in one pass; a missing file is an
/// empty ledger, not an error. Saves rewrite the snapshot wholesale: the new
/// contents go to a sibling temporary file which is then renamed over the
/// target, so a concurrent or later load observes either the old snapshot or
/// the new one, never a torn write.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store for the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the replacement snapshot is staged at before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> StoreResult<Vec<Obligation>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let text = String::from_utf8(bytes).map_err(|_| StoreError::NotUtf8)?;
        let records = format::parse(&text)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "snapshot loaded"
        );
        Ok(records)
    }

    fn save(&self, records: &[Obligation]) -> StoreResult<()> {
        let staging = self.staging_path();
        fs::write(&staging, format::render(records))?;
        fs::rename(&staging, &self.path)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "snapshot written"
        );
        Ok(())
    }
}

impl std::fmt::Debug for FileSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSnapshotStore")
            .field("path", &self.path)
            .finish()
    }
}
