use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::party::PartyId;

/// Monetary amount in whole units. Obligations never hold zero.
pub type Amount = u64;

/// A single directed obligation: `debtor` owes `creditor` exactly `amount`.
///
/// Invariants (enforced by [`Obligation::new`] and preserved by every
/// ledger operation):
/// - `debtor != creditor` -- a party never owes itself
/// - `amount > 0` -- a settled obligation is removed, not zeroed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub debtor: PartyId,
    pub creditor: PartyId,
    pub amount: Amount,
}

impl Obligation {
    /// Build a validated obligation.
    pub fn new(debtor: PartyId, creditor: PartyId, amount: Amount) -> Result<Self, TypeError> {
        if debtor == creditor {
            return Err(TypeError::SelfReferential { id: debtor });
        }
        if amount == 0 {
            return Err(TypeError::ZeroAmount);
        }
        Ok(Self {
            debtor,
            creditor,
            amount,
        })
    }

    /// True when `party` appears on either side of the record.
    pub fn involves(&self, party: &PartyId) -> bool {
        &self.debtor == party || &self.creditor == party
    }
}

impl fmt::Display for Obligation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.debtor, self.creditor, self.amount)
    }
}
