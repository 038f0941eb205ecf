use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, warn};

use tally_ledger::{AuditReport, Ledger, LedgerAudit, NettingEngine, StatementBuilder};
use tally_store::{FileSnapshotStore, SnapshotStore, StoreError};
use tally_types::{Amount, Obligation, PartyId};

use crate::config::ServiceConfig;
use crate::confirmation::Confirmation;
use crate::error::{ServiceError, ServiceResult};

/// The debt ledger service: one ledger, one snapshot, one writer.
///
/// Every operation, reads included, serializes behind a single lock; that
/// is the whole concurrency story, one logical writer per snapshot. The
/// snapshot is loaded lazily by whichever operation runs first and is never
/// reloaded within the process lifetime.
pub struct DebtService<S: SnapshotStore> {
    store: S,
    state: Mutex<ServiceState>,
}

struct ServiceState {
    ledger: Ledger,
    loaded: bool,
}

/// Service over the default file-backed store.
pub type FileDebtService = DebtService<FileSnapshotStore>;

impl DebtService<FileSnapshotStore> {
    /// Service over the snapshot file named by `config`.
    pub fn open(config: &ServiceConfig) -> Self {
        Self::new(FileSnapshotStore::new(config.snapshot_path.clone()))
    }
}

impl<S: SnapshotStore> DebtService<S> {
    /// Create a service over a snapshot store. Nothing is loaded until the
    /// first operation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Mutex::new(ServiceState {
                ledger: Ledger::new(),
                loaded: false,
            }),
        }
    }

    /// The underlying snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record that `debtor` owes `creditor` an additional `amount`, net the
    /// result through both endpoints, and persist the outcome.
    ///
    /// A snapshot write failure is reported as
    /// [`ServiceError::SnapshotWrite`] but does not roll back the in-memory
    /// mutation; memory stays ahead of disk until the next successful save.
    pub fn record_debt(
        &self,
        debtor: PartyId,
        creditor: PartyId,
        amount: Amount,
    ) -> ServiceResult<Confirmation> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);

        state
            .ledger
            .upsert(debtor.clone(), creditor.clone(), amount)?;
        NettingEngine::net(&mut state.ledger, &debtor)?;
        NettingEngine::net(&mut state.ledger, &creditor)?;

        debug!(
            %debtor,
            %creditor,
            amount,
            records = state.ledger.len(),
            "debt recorded"
        );

        self.persist(&state.ledger)?;

        Ok(Confirmation {
            debtor,
            creditor,
            amount,
            ledger_size: state.ledger.len(),
        })
    }

    /// Rendered statement of one party's debts and credits.
    pub fn statement_for(&self, party: &PartyId) -> ServiceResult<String> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        Ok(StatementBuilder::for_party(&state.ledger, party))
    }

    /// Rendered listing of every record.
    pub fn statement_all(&self) -> ServiceResult<String> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        Ok(StatementBuilder::all(&state.ledger))
    }

    /// Copy of the live record set, in ledger order.
    pub fn records(&self) -> ServiceResult<Vec<Obligation>> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        Ok(state.ledger.to_records())
    }

    /// Re-check every ledger invariant.
    pub fn audit(&self) -> ServiceResult<AuditReport> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        Ok(LedgerAudit::run(&state.ledger))
    }

    fn lock(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().expect("lock poisoned")
    }

    /// Load the snapshot into the ledger if this is the first operation.
    ///
    /// A corrupt or unreadable snapshot degrades to an empty ledger with a
    /// warning: a damaged file loses history but never blocks new records.
    /// The load is attempted once per process, whatever the outcome.
    fn ensure_loaded(&self, state: &mut ServiceState) {
        if state.loaded {
            return;
        }
        state.loaded = true;

        match self.store.load() {
            Ok(records) => {
                for record in &records {
                    debug!(
                        debtor = %record.debtor,
                        creditor = %record.creditor,
                        amount = record.amount,
                        "loading debt"
                    );
                }
                match Ledger::from_records(records) {
                    Ok(ledger) => {
                        debug!(records = ledger.len(), "ledger loaded from snapshot");
                        state.ledger = ledger;
                    }
                    Err(err) => {
                        warn!(
                            error = %err,
                            "snapshot does not fit a ledger! aborting load, starting empty"
                        );
                    }
                }
            }
            Err(StoreError::Io(err)) => {
                warn!(error = %err, "snapshot unreadable, starting empty");
            }
            Err(err) => {
                warn!(error = %err, "data file corrupt! aborting load, starting empty");
            }
        }
    }

    fn persist(&self, ledger: &Ledger) -> ServiceResult<()> {
        let records = ledger.to_records();
        self.store.save(&records).map_err(|err| {
            error!(error = %err, "failed to persist snapshot");
            ServiceError::SnapshotWrite(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_store::{InMemorySnapshotStore, StoreResult};
    use tally_types::TypeError;

    fn party(s: &str) -> PartyId {
        PartyId::new(s).unwrap()
    }

    fn record(debtor: &str, creditor: &str, amount: Amount) -> Obligation {
        Obligation::new(party(debtor), party(creditor), amount).unwrap()
    }

    fn service() -> DebtService<InMemorySnapshotStore> {
        DebtService::new(InMemorySnapshotStore::new())
    }

    /// Store whose saves always fail, for exercising the durability gap.
    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load(&self) -> StoreResult<Vec<Obligation>> {
            Ok(Vec::new())
        }

        fn save(&self, _records: &[Obligation]) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )))
        }
    }

    // -----------------------------------------------------------------------
    // Recording and netting
    // -----------------------------------------------------------------------

    #[test]
    fn records_a_new_debt() {
        let service = service();
        let confirmation = service
            .record_debt(party("alice"), party("bob"), 10)
            .unwrap();
        assert_eq!(
            confirmation.to_string(),
            "Added debt from alice to bob of 10."
        );
        assert_eq!(confirmation.ledger_size, 1);
        assert_eq!(service.records().unwrap(), vec![record("alice", "bob", 10)]);
    }

    #[test]
    fn repeat_debt_merges_into_one_record() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 10).unwrap();
        service.record_debt(party("alice"), party("bob"), 5).unwrap();
        assert_eq!(service.records().unwrap(), vec![record("alice", "bob", 15)]);
    }

    #[test]
    fn chain_debt_is_netted_through_the_middle_party() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 10).unwrap();
        service.record_debt(party("bob"), party("carol"), 4).unwrap();
        assert_eq!(
            service.records().unwrap(),
            vec![record("alice", "bob", 6), record("alice", "carol", 4)]
        );
    }

    #[test]
    fn mutual_debt_cancels_to_the_difference() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 10).unwrap();
        service.record_debt(party("bob"), party("alice"), 4).unwrap();
        assert_eq!(service.records().unwrap(), vec![record("alice", "bob", 6)]);
    }

    #[test]
    fn a_three_party_cycle_cancels_to_nothing() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 5).unwrap();
        service.record_debt(party("bob"), party("carol"), 5).unwrap();
        service.record_debt(party("carol"), party("alice"), 5).unwrap();
        assert_eq!(service.records().unwrap(), vec![]);
        assert_eq!(
            service.statement_all().unwrap(),
            "No debts have yet been added."
        );
    }

    #[test]
    fn every_mutation_is_persisted() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 10).unwrap();
        service.record_debt(party("bob"), party("carol"), 4).unwrap();
        assert_eq!(
            service.store().load().unwrap(),
            vec![record("alice", "bob", 6), record("alice", "carol", 4)]
        );
    }

    #[test]
    fn audit_is_clean_after_operations() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 10).unwrap();
        service.record_debt(party("bob"), party("carol"), 4).unwrap();
        service.record_debt(party("carol"), party("alice"), 2).unwrap();
        assert!(service.audit().unwrap().is_clean());
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn rejects_a_self_debt_without_recording() {
        let service = service();
        let err = service
            .record_debt(party("alice"), party("alice"), 5)
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(TypeError::SelfReferential { .. })
        ));
        assert_eq!(service.records().unwrap(), vec![]);
        assert!(service.store().is_empty());
    }

    #[test]
    fn rejects_a_zero_amount_without_recording() {
        let service = service();
        let err = service
            .record_debt(party("alice"), party("bob"), 0)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(TypeError::ZeroAmount)));
        assert!(service.store().is_empty());
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    #[test]
    fn first_operation_loads_the_snapshot() {
        let store = InMemorySnapshotStore::new();
        store.seed(vec![record("alice", "bob", 6)]);
        let service = DebtService::new(store);
        assert_eq!(
            service.statement_for(&party("bob")).unwrap(),
            "bob's credits:\n  alice: 6"
        );
    }

    #[test]
    fn snapshot_is_loaded_once_and_never_reread() {
        let store = InMemorySnapshotStore::new();
        store.seed(vec![record("alice", "bob", 6)]);
        let service = DebtService::new(store);

        assert_eq!(service.records().unwrap(), vec![record("alice", "bob", 6)]);

        // Replacing the stored snapshot after the first read changes nothing.
        service.store().seed(vec![record("x", "y", 1)]);
        assert_eq!(service.records().unwrap(), vec![record("alice", "bob", 6)]);
    }

    #[test]
    fn corrupt_snapshot_degrades_to_an_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.debt");
        std::fs::write(&path, "alice bob 1\nnot a record at all\n").unwrap();

        let service = DebtService::open(&ServiceConfig::at(&path));
        assert_eq!(
            service.statement_all().unwrap(),
            "No debts have yet been added."
        );

        // The next mutation overwrites the damaged file with a clean snapshot.
        service.record_debt(party("carol"), party("dave"), 3).unwrap();
        let reopened = DebtService::open(&ServiceConfig::at(&path));
        assert_eq!(reopened.records().unwrap(), vec![record("carol", "dave", 3)]);
    }

    #[test]
    fn missing_snapshot_starts_empty_and_is_created_on_first_debt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.debt");

        let service = DebtService::open(&ServiceConfig::at(&path));
        service.record_debt(party("alice"), party("bob"), 10).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "alice bob 10\n"
        );
    }

    #[test]
    fn file_backed_state_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig::at(dir.path().join("saved.debt"));

        let first = DebtService::open(&config);
        first.record_debt(party("alice"), party("bob"), 10).unwrap();
        first.record_debt(party("bob"), party("carol"), 4).unwrap();
        drop(first);

        let second = DebtService::open(&config);
        assert_eq!(
            second.records().unwrap(),
            vec![record("alice", "bob", 6), record("alice", "carol", 4)]
        );
    }

    // -----------------------------------------------------------------------
    // Persistence failure
    // -----------------------------------------------------------------------

    #[test]
    fn failed_save_reports_but_keeps_the_mutation() {
        let service = DebtService::new(FailingStore);
        let err = service
            .record_debt(party("alice"), party("bob"), 10)
            .unwrap_err();
        assert!(matches!(err, ServiceError::SnapshotWrite(_)));

        // The ledger kept the record; only durability was lost.
        assert_eq!(service.records().unwrap(), vec![record("alice", "bob", 10)]);
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    #[test]
    fn statement_for_an_unknown_party() {
        let service = service();
        service.record_debt(party("alice"), party("bob"), 1).unwrap();
        assert_eq!(
            service.statement_for(&party("zed")).unwrap(),
            "Could not find debts involving: zed."
        );
    }

    #[test]
    fn statement_all_lists_everything() {
        let service = service();
        service.record_debt(party("dave"), party("erin"), 9).unwrap();
        service.record_debt(party("alice"), party("bob"), 2).unwrap();
        assert_eq!(
            service.statement_all().unwrap(),
            "Showing all debts:\n  alice -> bob: 2\n  dave -> erin: 9"
        );
    }
}
