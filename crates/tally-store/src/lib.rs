//! Snapshot persistence for the tally debt ledger.
//!
//! The ledger's durable form is a flat text snapshot: one record per line,
//! `debtor creditor amount`, space-separated. The snapshot is overwritten
//! wholesale after every mutation and read back at most once per process.
//!
//! # Storage Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`FileSnapshotStore`] -- flat file with write-then-rename replacement
//! - [`InMemorySnapshotStore`] -- `RwLock`-held snapshot for tests and embedding
//!
//! # Design Rules
//!
//! 1. A snapshot is parsed in full or rejected as corrupt, never partially.
//! 2. Saves replace the snapshot atomically (staging file + rename).
//! 3. A missing snapshot file is an empty ledger, not an error.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod format;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use traits::SnapshotStore;
