//! Foundation types for the tally debt ledger.
//!
//! This crate provides the party and obligation types used throughout the
//! tally system. Every other tally crate depends on `tally-types`.
//!
//! # Key Types
//!
//! - [`PartyId`] -- Opaque, comparable name for a debtor or creditor
//! - [`Amount`] -- Whole-unit monetary amount
//! - [`Obligation`] -- A directed `debtor owes creditor amount` record

pub mod error;
pub mod obligation;
pub mod party;

pub use error::TypeError;
pub use obligation::{Amount, Obligation};
pub use party::PartyId;
