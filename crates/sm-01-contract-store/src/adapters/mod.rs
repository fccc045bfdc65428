//! # Adapters Module
//!
//! Implementations of the `ContractStore` port.
//!
//! ## Modules
//!
//! - `memory`: process-local store for tests and demos
//! - `file`: single-file persistent store for local development
//! - `json_rpc`: Ethereum JSON-RPC client for a deployed contract

pub mod file;
pub mod memory;

#[cfg(feature = "json-rpc")]
pub mod json_rpc;

pub use file::FileBackedContractStore;
pub use memory::InMemoryContractStore;

#[cfg(feature = "json-rpc")]
pub use json_rpc::{JsonRpcConfig, JsonRpcContractStore};

use sha3::{Digest, Keccak256};

/// Deterministic pseudo transaction hash for local adapters.
pub(crate) fn local_tx_hash(key: &str, value: &[u8], nonce: u64) -> String {
    let mut hasher = Keccak256::new();
    hasher.update(key.as_bytes());
    hasher.update(value);
    hasher.update(nonce.to_be_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}
