use tracing::debug;

use tally_types::{Amount, PartyId};

use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Summary of one netting run, for logs and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NettingReport {
    pub party: PartyId,
    /// Number of debit/credit pairs settled against each other.
    pub rounds: u64,
    /// Total amount moved onto outer `X -> Y` records.
    pub redirected: Amount,
    /// Total amount cancelled outright between mutual records.
    pub cancelled: Amount,
}

impl NettingReport {
    /// Returns `true` when the run found nothing to settle.
    pub fn was_noop(&self) -> bool {
        self.rounds == 0
    }
}

/// Pass-through elimination.
///
/// A party that both owes and is owed is a pass-through: some chain
/// `X -> party -> Y` can be shortened. A netting run settles such chains
/// until none remain, so afterwards the party appears only as a debtor or
/// only as a creditor anywhere in the ledger.
pub struct NettingEngine;

impl NettingEngine {
    /// Net all obligations passing through `party`, to a fixed point.
    ///
    /// Each round takes the party's first debit `D` and first credit `C` in
    /// ledger order and settles them against each other by
    /// `min(D.amount, C.amount)`. When the chain has three distinct parties
    /// the settled amount is redirected onto the outer `(C.debtor,
    /// D.creditor)` pair, merging if that record already exists; when the
    /// outer parties coincide the legs simply cancel. Rounds repeat, with
    /// both ends re-resolved from scratch, until the party lacks a debit or
    /// a credit.
    ///
    /// Terminates because every round removes at least one record touching
    /// the party, and a redirected record never touches it. Conservation
    /// holds per round: the party's balance changes by `+m - m`, the outer
    /// parties' by `-m + m`.
    pub fn net(ledger: &mut Ledger, party: &PartyId) -> Result<NettingReport, LedgerError> {
        let mut report = NettingReport {
            party: party.clone(),
            rounds: 0,
            redirected: 0,
            cancelled: 0,
        };

        loop {
            let (Some(debit_id), Some(credit_id)) =
                (ledger.first_debit_of(party), ledger.first_credit_of(party))
            else {
                break;
            };

            let debit = ledger
                .get(debit_id)
                .ok_or(LedgerError::RecordMissing(debit_id))?
                .clone();
            let credit = ledger
                .get(credit_id)
                .ok_or(LedgerError::RecordMissing(credit_id))?
                .clone();
            let settled = debit.amount.min(credit.amount);

            if credit.debtor == debit.creditor {
                // X -> party -> X: the legs cancel, nothing to redirect.
                report.cancelled = report.cancelled.saturating_add(settled);
            } else {
                ledger.upsert(credit.debtor, debit.creditor, settled)?;
                report.redirected = report.redirected.saturating_add(settled);
            }

            ledger.settle(debit_id, settled)?;
            ledger.settle(credit_id, settled)?;
            report.rounds += 1;
        }

        if !report.was_noop() {
            debug!(
                party = %report.party,
                rounds = report.rounds,
                redirected = report.redirected,
                cancelled = report.cancelled,
                "netted pass-through obligations"
            );
        }

        Ok(report)
    }
}
