//! # Listing Projector
//!
//! Builds the read model: every listing named by the index, newest first.
//!
//! ## Algorithm
//!
//! 1. Check `isAvailable()`. A false answer fails the whole load.
//! 2. Read the index (lenient, see `ListingIndexMaintainer::read_index`).
//! 3. For each id, in index order and one at a time, fetch `listing_{id}`.
//!    Missing, unreadable and malformed records are skipped with a warning.
//! 4. Stable sort by `timestamp` descending, so equal timestamps keep index
//!    order.
//!
//! Nothing is cached; every call re-reads the store.

use std::fmt;
use std::sync::Arc;

use shared_types::ListingId;
use sm_01_contract_store::ContractStore;
use tracing::{error, info, instrument, warn};

use super::index::ListingIndexMaintainer;
use crate::domain::{decode_record, record_key, Listing, MarketError};

/// Why a listing named by the index was left out of a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record key holds no value.
    Missing,
    /// The store call failed.
    FetchFailed(String),
    /// The value is not a valid listing record.
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("record missing"),
            Self::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            Self::Malformed(e) => write!(f, "malformed record: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: ListingId,
    pub reason: SkipReason,
}

/// Result of a load together with what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub listings: Vec<Listing>,
    pub skipped: Vec<SkippedRecord>,
}

/// Read-only view over the index and its records.
pub struct ListingProjector<S: ContractStore + ?Sized> {
    index: ListingIndexMaintainer<S>,
}

impl<S: ContractStore + ?Sized> ListingProjector<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            index: ListingIndexMaintainer::new(store),
        }
    }

    /// All readable listings, newest first.
    pub async fn load_all(&self) -> Result<Vec<Listing>, MarketError> {
        Ok(self.load_all_with_report().await?.listings)
    }

    /// Like [`load_all`](Self::load_all), also reporting skipped records.
    #[instrument(skip(self))]
    pub async fn load_all_with_report(&self) -> Result<Projection, MarketError> {
        let store = self.index.store();
        if !store.is_available().await? {
            error!("[sm-02] Contract store reports unavailable, not loading listings");
            return Err(MarketError::StoreUnavailable);
        }

        let ids = self.index.read_index().await?;
        let mut projection = Projection {
            listings: Vec::with_capacity(ids.len()),
            skipped: Vec::new(),
        };

        for id in ids {
            match self.fetch(&id).await {
                Ok(listing) => projection.listings.push(listing),
                Err(reason) => {
                    warn!(listing_id = %id, %reason, "[sm-02] Skipping listing");
                    projection.skipped.push(SkippedRecord { id, reason });
                }
            }
        }

        projection
            .listings
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        info!(
            loaded = projection.listings.len(),
            skipped = projection.skipped.len(),
            "[sm-02] Listings loaded"
        );
        Ok(projection)
    }

    async fn fetch(&self, id: &ListingId) -> Result<Listing, SkipReason> {
        let raw = self
            .index
            .store()
            .get_data(&record_key(id))
            .await
            .map_err(|e| SkipReason::FetchFailed(e.to_string()))?;
        if raw.is_empty() {
            return Err(SkipReason::Missing);
        }
        let record = decode_record(&raw).map_err(|e| SkipReason::Malformed(e.to_string()))?;
        Ok(Listing::from_record(id.clone(), record))
    }
}
