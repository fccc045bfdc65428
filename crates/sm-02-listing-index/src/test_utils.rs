//! Test helpers: deterministic ports, store wrappers and fixtures.
//!
//! Available to this crate's tests and, with the `test-utils` feature, to
//! the workspace test suite.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Address, ListingId, ListingStatus, UnixSeconds};
use sm_01_contract_store::{ContractStore, ContractStoreError, InMemoryContractStore, TxReceipt};

use crate::domain::{ListingDraft, ListingRecord};
use crate::ports::outbound::{IdGenerator, TimeSource};
use crate::service::{MarketplaceDependencies, MarketplaceService};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimeSource {
    millis: u64,
}

impl FixedTimeSource {
    pub fn new(millis: u64) -> Self {
        Self { millis }
    }
}

impl TimeSource for FixedTimeSource {
    fn now_millis(&self) -> u64 {
        self.millis
    }
}

/// Produces `{millis}-0000001`, `{millis}-0000002`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, now_millis: u64) -> ListingId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        ListingId::new(format!("{}-{:07}", now_millis, n))
    }
}

/// Store wrapper that yields to the scheduler after every read.
///
/// Makes read-modify-write interleavings reproducible under `tokio::join!`:
/// both tasks finish their read before either writes.
pub struct SlowReadStore<S> {
    inner: S,
}

impl<S: ContractStore> SlowReadStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ContractStore> ContractStore for SlowReadStore<S> {
    async fn is_available(&self) -> Result<bool, ContractStoreError> {
        self.inner.is_available().await
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError> {
        let value = self.inner.get_data(key).await;
        tokio::task::yield_now().await;
        value
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError> {
        self.inner.set_data(key, value).await
    }
}

/// Store wrapper whose reads of one key fail at the transport level.
pub struct FailingKeyStore<S> {
    inner: S,
    key: String,
}

impl<S: ContractStore> FailingKeyStore<S> {
    pub fn new(inner: S, key: impl Into<String>) -> Self {
        Self {
            inner,
            key: key.into(),
        }
    }
}

#[async_trait]
impl<S: ContractStore> ContractStore for FailingKeyStore<S> {
    async fn is_available(&self) -> Result<bool, ContractStoreError> {
        self.inner.is_available().await
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError> {
        if key == self.key {
            return Err(ContractStoreError::Transport(format!(
                "simulated failure reading {}",
                key
            )));
        }
        self.inner.get_data(key).await
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError> {
        self.inner.set_data(key, value).await
    }
}

pub type TestMarketplace =
    MarketplaceService<InMemoryContractStore, FixedTimeSource, SequentialIdGenerator>;

/// Deterministic account for tests.
pub fn account(byte: u8) -> Address {
    Address::new([byte; 20])
}

pub fn sample_draft(skill: &str) -> ListingDraft {
    ListingDraft::new(skill, 4.0, 30.0, format!("{}@example.org", skill.to_lowercase()))
}

/// Well-formed record created at `timestamp`.
pub fn record_at(timestamp: UnixSeconds) -> ListingRecord {
    ListingRecord {
        skill: format!("skill-{}", timestamp),
        hours_available: 1.5,
        rate: 20.0,
        encrypted_contact: "FHE-e30=".to_string(),
        timestamp,
        owner: account(0x11).to_string(),
        status: ListingStatus::Available,
    }
}

/// Marketplace over a fresh in-memory store, clock at 1_700_000_000.5s.
pub fn marketplace(account: Option<Address>) -> (Arc<InMemoryContractStore>, TestMarketplace) {
    let store = Arc::new(InMemoryContractStore::new());
    let service = MarketplaceService::new(
        MarketplaceDependencies {
            store: Arc::clone(&store),
            time_source: FixedTimeSource::new(1_700_000_000_500),
            id_generator: SequentialIdGenerator::default(),
        },
        account,
    );
    (store, service)
}
