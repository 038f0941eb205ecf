use tally_types::Obligation;

use crate::error::StoreResult;

/// Whole-snapshot persistence for the obligation record set.
///
/// All implementations must satisfy these invariants:
/// - A load returns the complete record set or fails; no partially-parsed
///   set is ever returned.
/// - A save replaces the previous snapshot wholesale and is atomic with
///   respect to a subsequent load: a reader sees the old snapshot or the
///   new one, never a mixture.
/// - A missing snapshot is an empty record set, not an error.
/// - All I/O errors are propagated, never silently ignored.
pub trait SnapshotStore: Send + Sync {
    /// Read the complete record set from the snapshot.
    fn load(&self) -> StoreResult<Vec<Obligation>>;

    /// Overwrite the snapshot with the given record set.
    fn save(&self, records: &[Obligation]) -> StoreResult<()>;
}
