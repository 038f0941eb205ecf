use thiserror::Error;

use tally_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed; nothing was recorded.
    #[error("invalid request: {0}")]
    Invalid(#[from] tally_types::TypeError),

    /// A ledger operation failed.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    /// The mutation applied but the snapshot write failed. Memory is ahead
    /// of disk until the next successful save.
    #[error("snapshot write failed: {0}")]
    SnapshotWrite(#[source] tally_store::StoreError),
}

// Validation failures surface as `Invalid` no matter which layer caught
// them; everything else from the ledger is passed through.
impl From<LedgerError> for ServiceError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Invalid(inner) => ServiceError::Invalid(inner),
            other => ServiceError::Ledger(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
