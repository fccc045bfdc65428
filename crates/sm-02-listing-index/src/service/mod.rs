//! # Listing Services
//!
//! - [`ListingIndexMaintainer`]: the `listing_keys` index.
//! - [`ListingProjector`]: the sorted read model.
//! - [`MarketplaceService`]: submit, book and complete on behalf of an
//!   account, plus statistics and search.

pub mod index;
pub mod market;
pub mod projector;

pub use index::ListingIndexMaintainer;
pub use market::{MarketplaceDependencies, MarketplaceService};
pub use projector::{ListingProjector, Projection, SkipReason, SkippedRecord};
