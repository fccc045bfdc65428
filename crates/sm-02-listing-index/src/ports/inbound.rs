//! # Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::{Address, ListingId};
use sm_01_contract_store::TxReceipt;

use crate::domain::{Listing, ListingDraft, MarketError};

/// Primary API of the marketplace.
///
/// Mirrors what a connected wallet can do in the marketplace front-end.
#[async_trait]
pub trait ListingMarketApi: Send + Sync {
    /// Account that signs writes, if one is connected.
    fn account(&self) -> Option<Address>;

    /// Re-fetch every listing, newest first.
    async fn load_listings(&self) -> Result<Vec<Listing>, MarketError>;

    /// Store a new listing and append it to the index.
    async fn submit_listing(&self, draft: ListingDraft) -> Result<Listing, MarketError>;

    /// Move an available listing to booked.
    async fn book_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError>;

    /// Move a booked listing to completed. Owner only.
    async fn complete_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError>;
}
