use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::local_tx_hash;
use crate::domain::{ContractStoreError, TxReceipt};
use crate::ports::outbound::ContractStore;

/// In-memory contract store.
///
/// Mirrors the contract's semantics (empty bytes for absent keys, whole-value
/// replacement) and adds switches for simulating an unavailable contract or a
/// signer that rejects writes.
pub struct InMemoryContractStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
    available: AtomicBool,
    reject_writes: AtomicBool,
    nonce: AtomicU64,
}

impl Default for InMemoryContractStore {
    fn default() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            reject_writes: AtomicBool::new(false),
            nonce: AtomicU64::new(0),
        }
    }
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the `isAvailable()` answer.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make every subsequent `set_data` fail as a user rejection.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Write directly, bypassing transaction bookkeeping (fixtures).
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.data.write().insert(key.into(), value.into());
    }

    /// Number of confirmed `set_data` calls.
    pub fn write_count(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn is_available(&self) -> Result<bool, ContractStoreError> {
        Ok(self.available.load(Ordering::SeqCst))
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError> {
        Ok(self.data.read().get(key).cloned().unwrap_or_default())
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(ContractStoreError::Rejected);
        }
        self.data.write().insert(key.to_string(), value.to_vec());
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TxReceipt::new(local_tx_hash(key, value, nonce), Some(nonce)))
    }
}
