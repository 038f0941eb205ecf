use thiserror::Error;

use crate::party::PartyId;

/// Errors produced by type construction and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("party id must not be empty")]
    EmptyPartyId,

    #[error("party id {id:?} contains whitespace")]
    WhitespaceInPartyId { id: String },

    #[error("a party cannot owe itself: {id}")]
    SelfReferential { id: PartyId },

    #[error("obligation amount must be greater than zero")]
    ZeroAmount,
}
