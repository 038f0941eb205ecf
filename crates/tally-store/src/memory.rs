use std::sync::RwLock;

use tally_types::Obligation;

use crate::error::StoreResult;
use crate::traits::SnapshotStore;

/// In-memory snapshot store.
///
/// Intended for tests and embedding. The snapshot is held behind a `RwLock`
/// and cloned on load and save, so the store observes the same
/// whole-snapshot semantics as the file backend.
pub struct InMemorySnapshotStore {
    records: RwLock<Vec<Obligation>>,
}

impl InMemorySnapshotStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Replace the held snapshot directly, bypassing `save`. Lets tests
    /// stage pre-existing state before the first load.
    pub fn seed(&self, records: Vec<Obligation>) {
        *self.records.write().expect("lock poisoned") = records;
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the current snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> StoreResult<Vec<Obligation>> {
        Ok(self.records.read().expect("lock poisoned").clone())
    }

    fn save(&self, records: &[Obligation]) -> StoreResult<()> {
        *self.records.write().expect("lock poisoned") = records.to_vec();
        Ok(())
    }
}

impl std::fmt::Debug for InMemorySnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshotStore")
            .field("record_count", &self.len())
            .finish()
    }
}
