//! # Outbound Ports (Driven Ports)
//!
//! The key-value contract as seen by its callers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ContractStoreError, TxReceipt};

/// Abstract interface for the key-value contract.
///
/// ## Semantics
///
/// - `get_data` returns an empty vector for a key that was never written.
/// - `set_data` replaces the whole value and returns only once the write is
///   confirmed.
/// - There is no conditional write. Callers doing read-modify-write must
///   accept lost updates between independent writers.
///
/// Production: `JsonRpcContractStore`
/// Development: `FileBackedContractStore`
/// Testing: `InMemoryContractStore`
#[async_trait]
pub trait ContractStore: Send + Sync {
    /// Health check exposed by the contract.
    async fn is_available(&self) -> Result<bool, ContractStoreError>;

    /// Read the value stored under `key`.
    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError>;

    /// Replace the value stored under `key` and wait for confirmation.
    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError>;
}

#[async_trait]
impl<T: ContractStore + ?Sized> ContractStore for Arc<T> {
    async fn is_available(&self) -> Result<bool, ContractStoreError> {
        (**self).is_available().await
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError> {
        (**self).get_data(key).await
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError> {
        (**self).set_data(key, value).await
    }
}
