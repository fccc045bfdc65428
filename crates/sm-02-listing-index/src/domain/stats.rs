//! # Dashboard Statistics and Search

use serde::Serialize;
use shared_types::ListingStatus;

use super::entities::Listing;

/// Counters shown on the marketplace dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    pub total: usize,
    pub available: usize,
    pub booked: usize,
    pub completed: usize,
    /// Sum of `hoursAvailable` over all listings, whatever their status.
    pub total_hours: f64,
}

impl MarketStats {
    pub fn from_listings(listings: &[Listing]) -> Self {
        listings.iter().fold(Self::default(), |mut stats, listing| {
            stats.total += 1;
            stats.total_hours += listing.hours_available;
            match listing.status {
                ListingStatus::Available => stats.available += 1,
                ListingStatus::Booked => stats.booked += 1,
                ListingStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }
}

/// Case-insensitive substring match on skill or status.
///
/// An empty term matches everything.
pub fn search<'a>(listings: &'a [Listing], term: &str) -> Vec<&'a Listing> {
    let needle = term.to_lowercase();
    listings
        .iter()
        .filter(|listing| {
            listing.skill.to_lowercase().contains(&needle)
                || listing.status.as_str().contains(&needle)
        })
        .collect()
}
