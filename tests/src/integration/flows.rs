//! # Marketplace Flows
//!
//! Exercise the listing index and marketplace service over the in-memory
//! and file-backed stores, checking the stored bytes other clients read.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{ListingId, ListingStatus};
    use sm_01_contract_store::{ContractStore, FileBackedContractStore, InMemoryContractStore};
    use sm_02_listing_index::domain::{decode_record, record_key};
    use sm_02_listing_index::test_utils::{
        account, marketplace, sample_draft, FixedTimeSource, SequentialIdGenerator,
    };
    use sm_02_listing_index::{
        ContactSeal, ListingIndexMaintainer, ListingProjector, MarketError, MarketplaceDependencies,
        MarketplaceService, INDEX_KEY,
    };

    // =============================================================================
    // RECORD FORMAT
    // =============================================================================

    #[tokio::test]
    async fn test_submitted_record_round_trips_losslessly() {
        let (store, market) = marketplace(Some(account(7)));
        let listing = market
            .submit_listing(sample_draft("Kubernetes"))
            .await
            .unwrap();

        let raw = store.get_data(&record_key(&listing.id)).await.unwrap();
        let record = decode_record(&raw).unwrap();
        assert_eq!(record, listing.to_record());

        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "skill",
            "hoursAvailable",
            "rate",
            "encryptedContact",
            "timestamp",
            "owner",
            "status",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert!(value.get("id").is_none());
    }

    #[tokio::test]
    async fn test_sealed_contact_opens_to_the_draft() {
        let (_, market) = marketplace(Some(account(7)));
        let draft = sample_draft("Figma");
        let listing = market.submit_listing(draft.clone()).await.unwrap();

        assert!(listing.encrypted_contact.starts_with("FHE-"));
        assert_eq!(ContactSeal::open(&listing.encrypted_contact).unwrap(), draft);
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_full_lifecycle_newest_first() {
        let store = Arc::new(InMemoryContractStore::new());
        let seller = MarketplaceService::new(
            MarketplaceDependencies {
                store: Arc::clone(&store),
                time_source: FixedTimeSource::new(1_700_000_000_000),
                id_generator: SequentialIdGenerator::default(),
            },
            Some(account(1)),
        );

        let first = seller.submit_listing(sample_draft("Rust")).await.unwrap();
        // A second seller a minute later.
        let later = MarketplaceService::new(
            MarketplaceDependencies {
                store: Arc::clone(&store),
                time_source: FixedTimeSource::new(1_700_000_060_000),
                id_generator: SequentialIdGenerator::default(),
            },
            Some(account(4)),
        );
        let second = later.submit_listing(sample_draft("Go")).await.unwrap();

        let buyer = ListingProjector::new(Arc::clone(&store));
        let listings = buyer.load_all().await.unwrap();
        assert_eq!(listings[0].id, second.id);
        assert_eq!(listings[1].id, first.id);

        seller.connect(account(2));
        seller.book_listing(&first.id).await.unwrap();
        seller.connect(account(1));
        seller.complete_listing(&first.id).await.unwrap();

        let listings = buyer.load_all().await.unwrap();
        let done = listings.iter().find(|l| l.id == first.id).unwrap();
        assert_eq!(done.status, ListingStatus::Completed);
        let open = listings.iter().find(|l| l.id == second.id).unwrap();
        assert_eq!(open.status, ListingStatus::Available);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_the_load() {
        let (store, market) = marketplace(Some(account(1)));
        market.submit_listing(sample_draft("Rust")).await.unwrap();
        store.set_available(false);

        assert!(matches!(
            market.load_listings().await,
            Err(MarketError::StoreUnavailable)
        ));
    }

    // =============================================================================
    // CORRUPT INDEX
    // =============================================================================

    #[tokio::test]
    async fn test_unparsable_index_is_never_fatal() {
        let (store, market) = marketplace(Some(account(1)));
        store.insert_raw(INDEX_KEY, b"\xff\xfe garbage".to_vec());

        assert!(market.load_listings().await.unwrap().is_empty());

        // The next submission starts a fresh index.
        let listing = market.submit_listing(sample_draft("Rust")).await.unwrap();
        let index = ListingIndexMaintainer::new(Arc::clone(&store));
        assert_eq!(index.read_index().await.unwrap(), vec![listing.id]);
    }

    // =============================================================================
    // FILE STORE
    // =============================================================================

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market.db");

        let id = {
            let store = Arc::new(FileBackedContractStore::new(&path));
            let market = MarketplaceService::new(
                MarketplaceDependencies {
                    store,
                    time_source: FixedTimeSource::new(1_700_000_000_000),
                    id_generator: SequentialIdGenerator::default(),
                },
                Some(account(3)),
            );
            market.submit_listing(sample_draft("Haskell")).await.unwrap().id
        };

        let store = Arc::new(FileBackedContractStore::new(&path));
        let listings = ListingProjector::new(store).load_all().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, id);
        assert_eq!(listings[0].owner, account(3).to_string());
        assert_eq!(listings[0].id, ListingId::from("1700000000000-0000001"));
    }
}
