//! # Domain Errors
//!
//! Error types for the Contract Store subsystem.

use thiserror::Error;

use super::abi::AbiError;

/// EIP-1193 provider error code for a user-rejected request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors returned by any `ContractStore` adapter.
#[derive(Debug, Clone, Error)]
pub enum ContractStoreError {
    /// The backend could not be reached or the connection failed mid-request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The JSON-RPC endpoint answered with an error object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The signer refused to send the transaction.
    #[error("user rejected transaction")]
    Rejected,

    /// The transaction was mined but reverted.
    #[error("transaction reverted: {tx_hash}")]
    Reverted { tx_hash: String },

    /// No receipt arrived before the configured deadline.
    #[error("timed out waiting for receipt of {tx_hash}")]
    ReceiptTimeout { tx_hash: String },

    /// Return data could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] AbiError),

    /// Malformed response outside the ABI payload (hex, JSON shape).
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Local storage I/O failure (file-backed adapter).
    #[error("store I/O error: {0}")]
    Io(String),

    /// Writes need a sender account and none was configured.
    #[error("no sender account configured for writes")]
    NoSender,
}

impl ContractStoreError {
    /// Classify an RPC error object, folding user rejections into `Rejected`.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == USER_REJECTED_CODE || message.to_lowercase().contains("user rejected") {
            Self::Rejected
        } else {
            Self::Rpc { code, message }
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}
