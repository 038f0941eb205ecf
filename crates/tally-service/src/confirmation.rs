use std::fmt;

use serde::{Deserialize, Serialize};

use tally_types::{Amount, PartyId};

/// Receipt returned by a successful [`record_debt`].
///
/// [`record_debt`]: crate::DebtService::record_debt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub debtor: PartyId,
    pub creditor: PartyId,
    pub amount: Amount,
    /// Number of live records after insertion and netting.
    pub ledger_size: usize,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added debt from {} to {} of {}.",
            self.debtor, self.creditor, self.amount
        )
    }
}
