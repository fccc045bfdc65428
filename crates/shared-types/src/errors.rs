//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised while parsing an account or contract address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input was not valid hexadecimal.
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),

    /// Decoded address had the wrong number of bytes.
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Errors related to the listing status lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// Status string is not one of the known states.
    #[error("Unknown listing status: {0}")]
    Unknown(String),
}
