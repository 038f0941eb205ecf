//! Orchestration facade for the tally debt ledger.
//!
//! [`DebtService`] owns the ledger, loads the snapshot lazily on first use,
//! applies the insert-then-net-both-endpoints write path, and persists after
//! every successful mutation. It is the single logical writer for its
//! snapshot: every operation serializes behind one lock.

pub mod config;
pub mod confirmation;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use confirmation::Confirmation;
pub use error::{ServiceError, ServiceResult};
pub use service::{DebtService, FileDebtService};
