//! The in-memory debt ledger and its pure logic.
//!
//! This crate is the heart of tally. It provides:
//! - The arena-backed obligation set with stable record handles
//! - Merge-on-insert upserts keyed by ordered `(debtor, creditor)` pair
//! - The netting engine (pass-through elimination to a fixed point)
//! - Deterministic statement rendering (per party and full listing)
//! - The ledger audit (invariant re-checks for diagnostics and tests)
//!
//! Nothing here touches persistence; `tally-service` composes this crate
//! with a snapshot store.

pub mod audit;
pub mod error;
pub mod ledger;
pub mod netting;
pub mod statement;

pub use audit::{AuditReport, LedgerAudit, Violation, ViolationKind};
pub use error::LedgerError;
pub use ledger::{Ledger, RecordId};
pub use netting::{NettingEngine, NettingReport};
pub use statement::StatementBuilder;
