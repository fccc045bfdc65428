//! # Listing Index Maintainer
//!
//! Keeps the ordered list of listing ids under [`INDEX_KEY`].
//!
//! `add_listing` is a plain read-append-write against a store without
//! conditional writes. Two maintainers that read the same snapshot and
//! both write back lose the earlier id. The write protocol is shared with
//! other clients of the contract, so it is not changed here; callers in one
//! process serialize through `MarketplaceService`.

use std::sync::Arc;

use shared_types::ListingId;
use sm_01_contract_store::{ContractStore, TxReceipt};
use tracing::{debug, warn};

use crate::domain::{decode_index, encode_index, MarketError, INDEX_KEY};

/// Reads and rewrites the listing index.
pub struct ListingIndexMaintainer<S: ContractStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ContractStore + ?Sized> Clone for ListingIndexMaintainer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ContractStore + ?Sized> ListingIndexMaintainer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Current index. Absent and unparsable values both read as empty.
    ///
    /// Only store failures are returned; a corrupt index is logged and
    /// dropped so the next append starts a fresh one.
    pub async fn read_index(&self) -> Result<Vec<ListingId>, MarketError> {
        let raw = self.store.get_data(INDEX_KEY).await?;
        match decode_index(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!(
                    error = %e,
                    bytes = raw.len(),
                    "[sm-02] Index value is not a JSON string array, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole index.
    pub async fn write_index(&self, ids: &[ListingId]) -> Result<TxReceipt, MarketError> {
        let bytes = encode_index(ids)?;
        let receipt = self.store.set_data(INDEX_KEY, &bytes).await?;
        debug!(entries = ids.len(), tx_hash = %receipt.tx_hash, "[sm-02] Index written");
        Ok(receipt)
    }

    /// Append `id` and write the index back.
    ///
    /// Does not deduplicate: appending an id twice lists it twice.
    pub async fn add_listing(&self, id: &ListingId) -> Result<TxReceipt, MarketError> {
        let mut ids = self.read_index().await?;
        ids.push(id.clone());
        self.write_index(&ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_01_contract_store::InMemoryContractStore;

    fn maintainer() -> (Arc<InMemoryContractStore>, ListingIndexMaintainer<InMemoryContractStore>) {
        let store = Arc::new(InMemoryContractStore::new());
        (Arc::clone(&store), ListingIndexMaintainer::new(store))
    }

    #[tokio::test]
    async fn test_absent_index_reads_as_empty() {
        let (_, index) = maintainer();
        assert!(index.read_index().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_listing_appends_in_order() {
        let (store, index) = maintainer();
        index.add_listing(&ListingId::from("1-a")).await.unwrap();
        index.add_listing(&ListingId::from("2-b")).await.unwrap();

        let raw = store.get_data(INDEX_KEY).await.unwrap();
        assert_eq!(raw, br#"["1-a","2-b"]"#.to_vec());
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_unparsable_index_is_treated_as_empty() {
        let (store, index) = maintainer();
        store.insert_raw(INDEX_KEY, b"{not json".to_vec());

        assert!(index.read_index().await.unwrap().is_empty());

        index.add_listing(&ListingId::from("3-c")).await.unwrap();
        assert_eq!(
            index.read_index().await.unwrap(),
            vec![ListingId::from("3-c")]
        );
    }

    #[tokio::test]
    async fn test_index_of_wrong_shape_is_treated_as_empty() {
        let (store, index) = maintainer();
        store.insert_raw(INDEX_KEY, b"[1,2,3]".to_vec());
        assert!(index.read_index().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_kept() {
        let (_, index) = maintainer();
        let id = ListingId::from("9-z");
        index.add_listing(&id).await.unwrap();
        index.add_listing(&id).await.unwrap();
        assert_eq!(index.read_index().await.unwrap(), vec![id.clone(), id]);
    }

    #[tokio::test]
    async fn test_rejected_write_surfaces() {
        let (store, index) = maintainer();
        store.set_reject_writes(true);
        let err = index.add_listing(&ListingId::from("1-a")).await.unwrap_err();
        assert!(err.is_rejection());
    }
}
