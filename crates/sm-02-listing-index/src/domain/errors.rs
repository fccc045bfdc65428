//! # Domain Errors
//!
//! Error types for the Listing Index subsystem.

use shared_types::{ListingId, ListingStatus};
use sm_01_contract_store::ContractStoreError;
use thiserror::Error;

/// Errors surfaced by the marketplace write path and the projector.
#[derive(Debug, Clone, Error)]
pub enum MarketError {
    /// `isAvailable()` returned false.
    #[error("contract store is not available")]
    StoreUnavailable,

    /// The underlying store call failed.
    #[error(transparent)]
    Store(#[from] ContractStoreError),

    /// A write was attempted without an account.
    #[error("wallet not connected")]
    WalletNotConnected,

    /// No record is stored under the listing's key.
    #[error("listing not found: {id}")]
    ListingNotFound { id: ListingId },

    /// The requested status change is not allowed from the current status.
    #[error("listing {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: ListingId,
        from: ListingStatus,
        to: ListingStatus,
    },

    /// Only the listing owner may perform this change.
    #[error("only the owner can update listing {id}")]
    NotOwner { id: ListingId },

    /// Draft input failed validation.
    #[error("invalid listing: {0}")]
    InvalidDraft(String),

    /// Record or index (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MarketError {
    /// True when the signer refused the transaction.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_rejection())
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_passes_through() {
        let err: MarketError = ContractStoreError::Rejected.into();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "user rejected transaction");
        assert!(!MarketError::WalletNotConnected.is_rejection());
    }

    #[test]
    fn test_transition_error_display() {
        let err = MarketError::InvalidTransition {
            id: ListingId::from("42-abc"),
            from: ListingStatus::Completed,
            to: ListingStatus::Booked,
        };
        assert_eq!(
            err.to_string(),
            "listing 42-abc cannot move from completed to booked"
        );
    }
}
