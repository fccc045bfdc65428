//! # Outbound Ports (Driven Ports)

use shared_types::ListingId;

pub use sm_01_contract_store::ContractStore;

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    ///
    /// Listing ids use the milliseconds; record timestamps are floored to
    /// seconds.
    fn now_millis(&self) -> u64;
}

/// Source of fresh listing ids.
pub trait IdGenerator: Send + Sync {
    /// Produce an id for a listing created at `now_millis`.
    fn next_id(&self, now_millis: u64) -> ListingId;
}
