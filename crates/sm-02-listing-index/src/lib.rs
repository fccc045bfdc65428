//! # Listing Index Subsystem (sm-02)
//!
//! Listings live in the contract store as two kinds of values:
//!
//! ```text
//! listing_keys   -> ["1700000000123-k3x9a0q", "1700000004567-p0b2c7d", ...]
//! listing_{id}   -> {"skill":..,"hoursAvailable":..,"rate":..,
//!                    "encryptedContact":"FHE-..","timestamp":..,
//!                    "owner":"0x..","status":"available"}
//! ```
//!
//! ## Components
//!
//! | Component | Role |
//! |-----------|------|
//! | `ListingIndexMaintainer` | read-append-write of `listing_keys` |
//! | `ListingProjector` | index + records -> listings, newest first |
//! | `MarketplaceService` | submit / book / complete for one account |
//!
//! ## Known Hazard: Lost Index Updates
//!
//! The store has no conditional write. Two writers that read the same index
//! and both append will each overwrite the other; the earlier id disappears
//! from the index while its record stays in the store. `MarketplaceService`
//! serializes its own appends, but separate processes still race.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): records, codecs, contact seal, stats.
//! - **Ports Layer** (`ports/`): `ListingMarketApi`, `TimeSource`,
//!   `IdGenerator`.
//! - **Adapters Layer** (`adapters/`): system clock, random ids.
//! - **Service Layer** (`service/`): index maintainer, projector, marketplace.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::{RandomIdGenerator, SystemTimeSource};
pub use domain::{
    ContactSeal, Listing, ListingDraft, ListingRecord, MarketError, MarketStats, INDEX_KEY,
    RECORD_KEY_PREFIX,
};
pub use ports::{IdGenerator, ListingMarketApi, TimeSource};
pub use service::{
    ListingIndexMaintainer, ListingProjector, MarketplaceDependencies, MarketplaceService,
    Projection, SkipReason, SkippedRecord,
};
