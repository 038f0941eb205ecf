use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for a [`DebtService`](crate::DebtService).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path of the snapshot file the ledger is loaded from and saved to.
    pub snapshot_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("saved.debt"),
        }
    }
}

impl ServiceConfig {
    /// Configuration pointing at a specific snapshot path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: path.into(),
        }
    }
}
