use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tally_types::{Amount, Obligation, PartyId};

use crate::error::LedgerError;

/// Stable handle to a record in the ledger arena.
///
/// Ids come from a monotonic counter and are never reused within a process,
/// so a held id stays valid until its record is settled away and is
/// definitively absent afterwards. Ascending id order is insertion order,
/// which is the scan order the netting engine depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The in-memory obligation set.
///
/// Records live in an arena keyed by [`RecordId`]; a secondary index maps
/// each ordered `(debtor, creditor)` pair to its record, which is what keeps
/// pairs unique. All mutation goes through [`Ledger::upsert`] and
/// [`Ledger::settle`], and both structures are maintained together.
#[derive(Default)]
pub struct Ledger {
    last_id: u64,
    records: BTreeMap<RecordId, Obligation>,
    by_pair: HashMap<(PartyId, PartyId), RecordId>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from a loaded record set, in order.
    ///
    /// Records for the same ordered pair merge, so a snapshot edited by hand
    /// still loads into a pair-unique ledger. Fails only if a merged amount
    /// overflows.
    pub fn from_records(records: Vec<Obligation>) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for record in records {
            ledger.upsert(record.debtor, record.creditor, record.amount)?;
        }
        Ok(ledger)
    }

    /// Insert an obligation, merging into the existing record for the same
    /// ordered pair if there is one. Returns the id of the touched record.
    pub fn upsert(
        &mut self,
        debtor: PartyId,
        creditor: PartyId,
        amount: Amount,
    ) -> Result<RecordId, LedgerError> {
        let record = Obligation::new(debtor, creditor, amount)?;
        let key = (record.debtor.clone(), record.creditor.clone());

        if let Some(&id) = self.by_pair.get(&key) {
            let existing = self
                .records
                .get_mut(&id)
                .ok_or(LedgerError::RecordMissing(id))?;
            existing.amount = existing.amount.checked_add(record.amount).ok_or(
                LedgerError::AmountOverflow {
                    debtor: key.0,
                    creditor: key.1,
                },
            )?;
            Ok(id)
        } else {
            self.last_id += 1;
            let id = RecordId(self.last_id);
            self.records.insert(id, record);
            self.by_pair.insert(key, id);
            Ok(id)
        }
    }

    /// Clear `amount` from a record, removing it when the balance reaches
    /// zero. Clearing more than the record holds is an invariant violation.
    pub fn settle(&mut self, id: RecordId, amount: Amount) -> Result<(), LedgerError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(LedgerError::RecordMissing(id))?;
        if amount > record.amount {
            return Err(LedgerError::SettleExceedsBalance {
                id,
                amount,
                balance: record.amount,
            });
        }
        record.amount -= amount;
        if record.amount == 0 {
            if let Some(removed) = self.records.remove(&id) {
                self.by_pair.remove(&(removed.debtor, removed.creditor));
            }
        }
        Ok(())
    }

    /// The record behind a handle, if it still exists.
    pub fn get(&self, id: RecordId) -> Option<&Obligation> {
        self.records.get(&id)
    }

    /// The record for an exact ordered pair, if present.
    pub fn record_for_pair(&self, debtor: &PartyId, creditor: &PartyId) -> Option<RecordId> {
        self.by_pair
            .get(&(debtor.clone(), creditor.clone()))
            .copied()
    }

    /// First record (in ledger order) where `party` is the debtor.
    pub fn first_debit_of(&self, party: &PartyId) -> Option<RecordId> {
        self.records
            .iter()
            .find(|(_, record)| &record.debtor == party)
            .map(|(id, _)| *id)
    }

    /// First record (in ledger order) where `party` is the creditor.
    pub fn first_credit_of(&self, party: &PartyId) -> Option<RecordId> {
        self.records
            .iter()
            .find(|(_, record)| &record.creditor == party)
            .map(|(id, _)| *id)
    }

    /// Iterate records in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Obligation)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Clone the record set out in ledger order, for persistence and views.
    pub fn to_records(&self) -> Vec<Obligation> {
        self.records.values().cloned().collect()
    }

    /// Net position of a party: credits minus debits, signed.
    pub fn balance_of(&self, party: &PartyId) -> i128 {
        let mut balance = 0i128;
        for record in self.records.values() {
            if &record.creditor == party {
                balance += record.amount as i128;
            }
            if &record.debtor == party {
                balance -= record.amount as i128;
            }
        }
        balance
    }

    /// All parties appearing on either side of any record, sorted.
    pub fn parties(&self) -> Vec<PartyId> {
        let mut parties: Vec<PartyId> = self
            .records
            .values()
            .flat_map(|record| [record.debtor.clone(), record.creditor.clone()])
            .collect();
        parties.sort();
        parties.dedup();
        parties
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn pair_index_len(&self) -> usize {
        self.by_pair.len()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("record_count", &self.records.len())
            .field("last_id", &self.last_id)
            .finish()
    }
}
