use tally_types::{Amount, PartyId, TypeError};

use crate::ledger::RecordId;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Input failed record validation.
    #[error("invalid record: {0}")]
    Invalid(#[from] TypeError),

    /// Merging would push the pair's amount past the representable maximum.
    #[error("amount overflow merging obligation {debtor} -> {creditor}")]
    AmountOverflow { debtor: PartyId, creditor: PartyId },

    /// A held record id resolved to nothing. Internal invariant violation.
    #[error("no record with id {0}")]
    RecordMissing(RecordId),

    /// A settlement tried to clear more than the record holds. Internal
    /// invariant violation.
    #[error("settling {amount} exceeds the {balance} held by record {id}")]
    SettleExceedsBalance {
        id: RecordId,
        amount: Amount,
        balance: Amount,
    },
}
