//! # Value Objects

use serde::{Deserialize, Serialize};

/// Confirmation of a mined `setData` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// `0x`-prefixed transaction hash.
    pub tx_hash: String,
    /// Block the transaction landed in, when the backend reports one.
    pub block_number: Option<u64>,
}

impl TxReceipt {
    pub fn new(tx_hash: impl Into<String>, block_number: Option<u64>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            block_number,
        }
    }
}
