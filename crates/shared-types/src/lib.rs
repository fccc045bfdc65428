//! # Shared Types Crate
//!
//! Primitives used across the Skill Market crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the listing status lifecycle and the address
//!   format are defined once here and reused by the store, the index and the CLI.
//! - **Wire Compatibility**: serde representations match the JSON written by
//!   other clients of the same contract (lowercase status strings, `0x` hex
//!   addresses).

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
