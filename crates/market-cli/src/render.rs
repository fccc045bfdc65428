//! Plain-text rendering of listings, statistics and failures.

use sm_02_listing_index::{Listing, MarketError, MarketStats, SkippedRecord};

/// Write operations whose failures get a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Submit,
    Book,
    Complete,
}

/// Message shown when a write fails.
///
/// A signer refusal gets its own message whatever the action.
pub fn failure_message(action: WriteAction, err: &MarketError) -> String {
    if err.is_rejection() {
        return "Transaction rejected by user".to_string();
    }
    match action {
        WriteAction::Submit => format!("Submission failed: {}", err),
        WriteAction::Book => format!("Booking failed: {}", err),
        WriteAction::Complete => format!("Completion failed: {}", err),
    }
}

pub fn listing_card(listing: &Listing) -> String {
    format!(
        "[{status}] {skill}\n  id:      {id}\n  hours:   {hours}    rate: {rate} / h\n  owner:   {owner}\n  contact: {contact}\n  listed:  {listed}\n",
        status = listing.status,
        skill = listing.skill,
        id = listing.id,
        hours = listing.hours_available,
        rate = listing.rate,
        owner = listing.owner,
        contact = listing.encrypted_contact,
        listed = listing.timestamp,
    )
}

pub fn listing_cards(listings: &[&Listing]) -> String {
    if listings.is_empty() {
        return "No listings yet.\n".to_string();
    }
    listings
        .iter()
        .map(|listing| listing_card(listing))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats_summary(stats: &MarketStats) -> String {
    format!(
        "Listings:  {}\nAvailable: {}\nBooked:    {}\nCompleted: {}\nHours:     {}\n",
        stats.total, stats.available, stats.booked, stats.completed, stats.total_hours
    )
}

/// One line per record the projector had to leave out.
pub fn skipped_summary(skipped: &[SkippedRecord]) -> String {
    skipped
        .iter()
        .map(|s| format!("skipped {}: {}\n", s.id, s.reason))
        .collect()
}
