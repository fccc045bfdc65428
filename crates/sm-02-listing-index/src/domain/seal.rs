//! # Contact Seal
//!
//! The marketplace tags a listing's contact details as
//! `"FHE-" + base64(JSON(draft))`. This is a reversible encoding that hides
//! nothing; `open` recovers the draft from any sealed value. The tag is kept
//! for wire compatibility with listings written by other clients.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::entities::ListingDraft;
use super::errors::MarketError;

/// Prefix marking a sealed contact value.
pub const SEAL_PREFIX: &str = "FHE-";

pub struct ContactSeal;

impl ContactSeal {
    /// Produce the sealed contact value for a draft.
    pub fn seal(draft: &ListingDraft) -> Result<String, MarketError> {
        let json = serde_json::to_vec(draft)?;
        Ok(format!("{}{}", SEAL_PREFIX, STANDARD.encode(json)))
    }

    /// Recover the draft a sealed value was produced from.
    pub fn open(sealed: &str) -> Result<ListingDraft, MarketError> {
        let encoded = sealed
            .strip_prefix(SEAL_PREFIX)
            .ok_or_else(|| MarketError::Serialization("contact is not sealed".into()))?;
        let json = STANDARD
            .decode(encoded)
            .map_err(|e| MarketError::Serialization(e.to_string()))?;
        Ok(serde_json::from_slice(&json)?)
    }

    pub fn is_sealed(value: &str) -> bool {
        value.starts_with(SEAL_PREFIX)
    }
}
