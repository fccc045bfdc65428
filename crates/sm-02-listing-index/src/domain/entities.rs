//! # Core Domain Entities
//!
//! - `ListingRecord`: the JSON object stored under `listing_{id}`
//! - `Listing`: a record joined with its id, as presented to callers
//! - `ListingDraft`: what a seller fills in before submitting

use serde::{Deserialize, Deserializer, Serialize};
use shared_types::{ListingId, ListingStatus, UnixSeconds};

use super::errors::MarketError;

/// Stored listing payload.
///
/// ## Wire Format
///
/// UTF-8 JSON object with camelCase keys. The id is not part of the record;
/// it is implied by the key it is stored under. A missing, `null` or empty
/// `status` reads as `available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub skill: String,
    pub hours_available: f64,
    pub rate: f64,
    pub encrypted_contact: String,
    pub timestamp: UnixSeconds,
    pub owner: String,
    #[serde(default, deserialize_with = "status_or_available")]
    pub status: ListingStatus,
}

fn status_or_available<'de, D>(deserializer: D) -> Result<ListingStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(ListingStatus::Available),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A listing as presented to callers: the record plus its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub skill: String,
    pub hours_available: f64,
    pub rate: f64,
    pub encrypted_contact: String,
    pub timestamp: UnixSeconds,
    pub owner: String,
    pub status: ListingStatus,
}

impl Listing {
    pub fn from_record(id: ListingId, record: ListingRecord) -> Self {
        Self {
            id,
            skill: record.skill,
            hours_available: record.hours_available,
            rate: record.rate,
            encrypted_contact: record.encrypted_contact,
            timestamp: record.timestamp,
            owner: record.owner,
            status: record.status,
        }
    }

    pub fn to_record(&self) -> ListingRecord {
        ListingRecord {
            skill: self.skill.clone(),
            hours_available: self.hours_available,
            rate: self.rate,
            encrypted_contact: self.encrypted_contact.clone(),
            timestamp: self.timestamp,
            owner: self.owner.clone(),
            status: self.status,
        }
    }
}

/// Seller input for a new listing.
///
/// Field order matters: the sealed contact is the base64 of this struct's
/// JSON, and other clients produce the same key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub skill: String,
    pub hours_available: f64,
    pub rate: f64,
    pub encrypted_contact: String,
}

impl ListingDraft {
    pub fn new(
        skill: impl Into<String>,
        hours_available: f64,
        rate: f64,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            skill: skill.into(),
            hours_available,
            rate,
            encrypted_contact: contact.into(),
        }
    }

    /// Reject drafts that would not survive the JSON round trip.
    ///
    /// Non-finite numbers serialize as `null` and would corrupt the record.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.skill.trim().is_empty() {
            return Err(MarketError::InvalidDraft("skill must not be empty".into()));
        }
        if !self.hours_available.is_finite() || self.hours_available < 0.0 {
            return Err(MarketError::InvalidDraft(
                "hours available must be a non-negative number".into(),
            ));
        }
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(MarketError::InvalidDraft(
                "rate must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
