//! # Lost Index Updates
//!
//! The index is rewritten whole on every append and the store has no
//! conditional write. These tests pin down both sides of that:
//!
//! - independent writers that interleave read-append-write lose an id;
//! - one `MarketplaceService` serializes its own appends and loses nothing.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::ListingId;
    use sm_01_contract_store::{ContractStore, InMemoryContractStore};
    use sm_02_listing_index::domain::{encode_record, record_key};
    use sm_02_listing_index::test_utils::{
        account, record_at, sample_draft, FixedTimeSource, SequentialIdGenerator, SlowReadStore,
    };
    use sm_02_listing_index::{
        ListingIndexMaintainer, ListingProjector, MarketplaceDependencies, MarketplaceService,
    };

    fn slow_store() -> Arc<SlowReadStore<InMemoryContractStore>> {
        Arc::new(SlowReadStore::new(InMemoryContractStore::new()))
    }

    #[tokio::test]
    async fn test_interleaved_appends_from_independent_writers_lose_one_id() {
        let store = slow_store();
        let writer_a = ListingIndexMaintainer::new(Arc::clone(&store));
        let writer_b = ListingIndexMaintainer::new(Arc::clone(&store));
        let a = ListingId::from("1-aaaaaaa");
        let b = ListingId::from("2-bbbbbbb");

        let (ra, rb) = tokio::join!(writer_a.add_listing(&a), writer_b.add_listing(&b));
        ra.unwrap();
        rb.unwrap();

        // Both read the empty index before either wrote; the later write wins.
        let index = writer_a.read_index().await.unwrap();
        assert_eq!(index, vec![b]);
        assert_eq!(store.inner().write_count(), 2);
    }

    #[tokio::test]
    async fn test_lost_id_leaves_an_orphaned_record() {
        let store = slow_store();
        for (id, ts) in [("1-aaaaaaa", 10), ("2-bbbbbbb", 20)] {
            store.inner().insert_raw(
                record_key(&ListingId::from(id)),
                encode_record(&record_at(ts)).unwrap(),
            );
        }
        let writer_a = ListingIndexMaintainer::new(Arc::clone(&store));
        let writer_b = ListingIndexMaintainer::new(Arc::clone(&store));

        let a = ListingId::from("1-aaaaaaa");
        let b = ListingId::from("2-bbbbbbb");
        let (ra, rb) = tokio::join!(writer_a.add_listing(&a), writer_b.add_listing(&b));
        ra.unwrap();
        rb.unwrap();

        let listings = ListingProjector::new(Arc::clone(&store)).load_all().await.unwrap();
        assert_eq!(listings.len(), 1);
        // Still stored, just no longer reachable through the index.
        assert!(!store.get_data(&record_key(&a)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sequential_appends_from_independent_writers_keep_both() {
        let store = slow_store();
        let writer_a = ListingIndexMaintainer::new(Arc::clone(&store));
        let writer_b = ListingIndexMaintainer::new(Arc::clone(&store));

        writer_a.add_listing(&ListingId::from("1")).await.unwrap();
        writer_b.add_listing(&ListingId::from("2")).await.unwrap();

        assert_eq!(writer_a.read_index().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_one_service_serializes_its_own_submissions() {
        let store = slow_store();
        let market = MarketplaceService::new(
            MarketplaceDependencies {
                store: Arc::clone(&store),
                time_source: FixedTimeSource::new(1_700_000_000_000),
                id_generator: SequentialIdGenerator::default(),
            },
            Some(account(9)),
        );

        let (a, b, c) = tokio::join!(
            market.submit_listing(sample_draft("A")),
            market.submit_listing(sample_draft("B")),
            market.submit_listing(sample_draft("C")),
        );
        let ids = [a.unwrap().id, b.unwrap().id, c.unwrap().id];

        let index = market.index().read_index().await.unwrap();
        assert_eq!(index.len(), 3);
        for id in &ids {
            assert!(index.contains(id));
        }
        assert_eq!(market.load_listings().await.unwrap().len(), 3);
    }
}
