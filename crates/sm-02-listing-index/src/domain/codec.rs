//! # Store Keys and Wire Formats
//!
//! | Key | Value |
//! |-----|-------|
//! | `listing_keys` | JSON array of listing id strings, in insertion order |
//! | `listing_{id}` | JSON `ListingRecord` |
//!
//! Both values are UTF-8 JSON. An empty value means "never written".

use serde_json::Value;
use shared_types::{ListingId, ListingStatus};

use super::entities::ListingRecord;

/// Well-known key holding the index.
pub const INDEX_KEY: &str = "listing_keys";

/// Prefix of per-listing record keys.
pub const RECORD_KEY_PREFIX: &str = "listing_";

/// Key under which a listing's record is stored.
pub fn record_key(id: &ListingId) -> String {
    format!("{}{}", RECORD_KEY_PREFIX, id)
}

/// Serialize the full index.
pub fn encode_index(ids: &[ListingId]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(ids)
}

/// Parse an index value. Empty bytes decode to an empty index.
///
/// Callers decide what a parse failure means; the index maintainer treats
/// it as empty.
pub fn decode_index(bytes: &[u8]) -> Result<Vec<ListingId>, serde_json::Error> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes)
}

pub fn encode_record(record: &ListingRecord) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(record)
}

pub fn decode_record(bytes: &[u8]) -> Result<ListingRecord, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Rewrite only the `status` of a stored record, keeping every other field
/// (including ones this crate does not model) as stored.
pub fn set_record_status(bytes: &[u8], status: ListingStatus) -> Result<Vec<u8>, serde_json::Error> {
    let mut value: Value = serde_json::from_slice(bytes)?;
    match value.as_object_mut() {
        Some(object) => {
            object.insert("status".to_string(), Value::String(status.as_str().to_string()));
        }
        None => {
            return Err(serde::de::Error::custom("listing record is not a JSON object"));
        }
    }
    serde_json::to_vec(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key() {
        assert_eq!(
            record_key(&ListingId::from("1700000000000-k3j9x0a")),
            "listing_1700000000000-k3j9x0a"
        );
    }

    #[test]
    fn test_index_wire_format() {
        let ids = vec![ListingId::from("a"), ListingId::from("b")];
        let bytes = encode_index(&ids).unwrap();
        assert_eq!(bytes, br#"["a","b"]"#.to_vec());
        assert_eq!(decode_index(&bytes).unwrap(), ids);
    }

    #[test]
    fn test_empty_index_value_is_empty() {
        assert!(decode_index(b"").unwrap().is_empty());
        assert!(decode_index(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_index_is_error() {
        assert!(decode_index(b"not json").is_err());
        assert!(decode_index(br#"{"a":1}"#).is_err());
        assert!(decode_index(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_set_status_preserves_unknown_fields() {
        let raw = br#"{"skill":"a","hoursAvailable":1,"rate":2,"encryptedContact":"","timestamp":5,"owner":"","status":"available","note":"keep me"}"#;
        let updated = set_record_status(raw, ListingStatus::Booked).unwrap();
        let value: Value = serde_json::from_slice(&updated).unwrap();
        assert_eq!(value["status"], "booked");
        assert_eq!(value["note"], "keep me");
        assert_eq!(decode_record(&updated).unwrap().status, ListingStatus::Booked);
    }

    #[test]
    fn test_set_status_rejects_non_object() {
        assert!(set_record_status(b"[1,2]", ListingStatus::Booked).is_err());
        assert!(set_record_status(b"{", ListingStatus::Booked).is_err());
    }
}
