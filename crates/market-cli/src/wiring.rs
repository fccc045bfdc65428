//! # Store and Service Wiring
//!
//! Builds the contract store selected by `MarketConfig` and the marketplace
//! service on top of it.

use std::sync::Arc;

use anyhow::Context;
use sm_01_contract_store::{
    ContractStore, FileBackedContractStore, InMemoryContractStore, JsonRpcConfig,
    JsonRpcContractStore,
};
use sm_02_listing_index::{
    MarketplaceDependencies, MarketplaceService, RandomIdGenerator, SystemTimeSource,
};
use tracing::info;

use crate::config::{ConfigError, MarketConfig, StoreKind};

/// The service as the CLI runs it.
pub type CliMarketplace =
    MarketplaceService<dyn ContractStore, SystemTimeSource, RandomIdGenerator>;

/// Instantiate the configured store.
pub fn build_store(config: &MarketConfig) -> anyhow::Result<Arc<dyn ContractStore>> {
    config.validate()?;

    let store: Arc<dyn ContractStore> = match config.store {
        StoreKind::Memory => Arc::new(InMemoryContractStore::new()),
        StoreKind::File => Arc::new(FileBackedContractStore::new(&config.data_file)),
        StoreKind::Rpc => {
            let contract = config.contract.ok_or(ConfigError::MissingContract)?;
            let rpc = JsonRpcConfig {
                rpc_url: config.rpc_url.clone(),
                contract,
                sender: config.account,
                receipt_poll_interval: config.poll_interval,
                receipt_timeout: config.receipt_timeout,
                ..JsonRpcConfig::default()
            };
            Arc::new(JsonRpcContractStore::new(rpc).context("creating JSON-RPC client")?)
        }
    };

    info!(store = %config.store, "Contract store ready");
    Ok(store)
}

/// Marketplace over an already built store.
pub fn build_marketplace(store: Arc<dyn ContractStore>, config: &MarketConfig) -> CliMarketplace {
    MarketplaceService::new(
        MarketplaceDependencies {
            store,
            time_source: SystemTimeSource,
            id_generator: RandomIdGenerator,
        },
        config.account,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Address;
    use sm_02_listing_index::ListingDraft;

    #[tokio::test]
    async fn test_file_store_round_trip_through_service() {
        let dir = tempfile::tempdir().unwrap();
        let config = MarketConfig {
            store: StoreKind::File,
            data_file: dir.path().join("market.db"),
            account: Some(Address::new([0x42; 20])),
            ..MarketConfig::default()
        };

        let market = build_marketplace(build_store(&config).unwrap(), &config);
        let listing = market
            .submit_listing(ListingDraft::new("Rust", 3.0, 50.0, "me@example.org"))
            .await
            .unwrap();

        // A second process sees the same data.
        let reopened = build_marketplace(build_store(&config).unwrap(), &config);
        let listings = reopened.load_listings().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, listing.id);
    }

    #[test]
    fn test_rpc_without_contract_is_rejected() {
        let config = MarketConfig {
            store: StoreKind::Rpc,
            ..MarketConfig::default()
        };
        assert!(build_store(&config).is_err());
    }
}
