//! # Marketplace Service
//!
//! Write path of the marketplace on behalf of one account.
//!
//! ## Status Rules
//!
//! | From | To | Who |
//! |------|----|-----|
//! | `available` | `booked` | any connected account |
//! | `booked` | `completed` | the listing owner only |
//!
//! The store enforces none of this. Status changes rewrite the stored JSON
//! object in place, so fields written by other clients survive.
//!
//! ## Index Writes
//!
//! All index appends from one service go through `index_guard`, so two
//! submissions in this process cannot drop each other's id. Independent
//! processes can still race (see `ListingIndexMaintainer`).

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, ListingId, ListingStatus};
use sm_01_contract_store::{ContractStore, TxReceipt};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::index::ListingIndexMaintainer;
use super::projector::{ListingProjector, Projection};
use crate::domain::{
    decode_record, encode_record, record_key, search, set_record_status, ContactSeal, Listing,
    ListingDraft, ListingRecord, MarketError, MarketStats,
};
use crate::ports::inbound::ListingMarketApi;
use crate::ports::outbound::{IdGenerator, TimeSource};

/// Dependencies for MarketplaceService
pub struct MarketplaceDependencies<S: ?Sized, T, G> {
    pub store: Arc<S>,
    pub time_source: T,
    pub id_generator: G,
}

/// The Marketplace Service.
pub struct MarketplaceService<S, T, G>
where
    S: ContractStore + ?Sized,
    T: TimeSource,
    G: IdGenerator,
{
    store: Arc<S>,
    index: ListingIndexMaintainer<S>,
    projector: ListingProjector<S>,
    time_source: T,
    id_generator: G,
    account: RwLock<Option<Address>>,
    index_guard: Mutex<()>,
}

impl<S, T, G> MarketplaceService<S, T, G>
where
    S: ContractStore + ?Sized,
    T: TimeSource,
    G: IdGenerator,
{
    pub fn new(deps: MarketplaceDependencies<S, T, G>, account: Option<Address>) -> Self {
        Self {
            index: ListingIndexMaintainer::new(Arc::clone(&deps.store)),
            projector: ListingProjector::new(Arc::clone(&deps.store)),
            store: deps.store,
            time_source: deps.time_source,
            id_generator: deps.id_generator,
            account: RwLock::new(account),
            index_guard: Mutex::new(()),
        }
    }

    /// Use `account` for subsequent writes.
    pub fn connect(&self, account: Address) {
        info!(%account, "[sm-02] Account connected");
        *self.account.write() = Some(account);
    }

    pub fn disconnect(&self) {
        *self.account.write() = None;
    }

    pub fn index(&self) -> &ListingIndexMaintainer<S> {
        &self.index
    }

    fn require_account(&self) -> Result<Address, MarketError> {
        (*self.account.read()).ok_or(MarketError::WalletNotConnected)
    }

    /// Seal the contact, store the record, then append the id to the index.
    ///
    /// If the index append fails the record is left behind unindexed.
    #[instrument(skip(self, draft), fields(skill = %draft.skill))]
    pub async fn submit_listing(&self, draft: ListingDraft) -> Result<Listing, MarketError> {
        let owner = self.require_account()?;
        draft.validate()?;

        let now_millis = self.time_source.now_millis();
        let id = self.id_generator.next_id(now_millis);
        let record = ListingRecord {
            skill: draft.skill.clone(),
            hours_available: draft.hours_available,
            rate: draft.rate,
            encrypted_contact: ContactSeal::seal(&draft)?,
            timestamp: now_millis / 1000,
            owner: owner.to_string(),
            status: ListingStatus::Available,
        };

        self.store
            .set_data(&record_key(&id), &encode_record(&record)?)
            .await?;

        {
            let _guard = self.index_guard.lock().await;
            if let Err(e) = self.index.add_listing(&id).await {
                warn!(listing_id = %id, error = %e, "[sm-02] Record stored but index append failed");
                return Err(e);
            }
        }

        info!(listing_id = %id, %owner, "[sm-02] Listing submitted");
        Ok(Listing::from_record(id, record))
    }

    /// Mark an available listing as booked.
    #[instrument(skip(self))]
    pub async fn book_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError> {
        let account = self.require_account()?;
        let (raw, record) = self.fetch_record(id).await?;
        Self::check_transition(id, record.status, ListingStatus::Booked)?;

        let receipt = self.write_status(id, &raw, ListingStatus::Booked).await?;
        info!(listing_id = %id, %account, "[sm-02] Listing booked");
        Ok(receipt)
    }

    /// Mark a booked listing as completed. Owner only.
    #[instrument(skip(self))]
    pub async fn complete_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError> {
        let account = self.require_account()?;
        let (raw, record) = self.fetch_record(id).await?;
        Self::check_transition(id, record.status, ListingStatus::Completed)?;
        if !account.matches_str(&record.owner) {
            return Err(MarketError::NotOwner { id: id.clone() });
        }

        let receipt = self.write_status(id, &raw, ListingStatus::Completed).await?;
        info!(listing_id = %id, "[sm-02] Listing completed");
        Ok(receipt)
    }

    pub async fn load_listings(&self) -> Result<Vec<Listing>, MarketError> {
        self.projector.load_all().await
    }

    pub async fn load_with_report(&self) -> Result<Projection, MarketError> {
        self.projector.load_all_with_report().await
    }

    pub fn stats(&self, listings: &[Listing]) -> MarketStats {
        MarketStats::from_listings(listings)
    }

    pub fn search<'a>(&self, listings: &'a [Listing], term: &str) -> Vec<&'a Listing> {
        search(listings, term)
    }

    async fn fetch_record(&self, id: &ListingId) -> Result<(Vec<u8>, ListingRecord), MarketError> {
        let raw = self.store.get_data(&record_key(id)).await?;
        if raw.is_empty() {
            return Err(MarketError::ListingNotFound { id: id.clone() });
        }
        let record = decode_record(&raw)?;
        Ok((raw, record))
    }

    fn check_transition(
        id: &ListingId,
        from: ListingStatus,
        to: ListingStatus,
    ) -> Result<(), MarketError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(MarketError::InvalidTransition {
                id: id.clone(),
                from,
                to,
            })
        }
    }

    async fn write_status(
        &self,
        id: &ListingId,
        raw: &[u8],
        status: ListingStatus,
    ) -> Result<TxReceipt, MarketError> {
        let updated = set_record_status(raw, status)?;
        Ok(self.store.set_data(&record_key(id), &updated).await?)
    }
}

#[async_trait]
impl<S, T, G> ListingMarketApi for MarketplaceService<S, T, G>
where
    S: ContractStore + ?Sized,
    T: TimeSource,
    G: IdGenerator,
{
    fn account(&self) -> Option<Address> {
        *self.account.read()
    }

    async fn load_listings(&self) -> Result<Vec<Listing>, MarketError> {
        MarketplaceService::load_listings(self).await
    }

    async fn submit_listing(&self, draft: ListingDraft) -> Result<Listing, MarketError> {
        MarketplaceService::submit_listing(self, draft).await
    }

    async fn book_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError> {
        MarketplaceService::book_listing(self, id).await
    }

    async fn complete_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError> {
        MarketplaceService::complete_listing(self, id).await
    }
}
