//! # Domain Layer
//!
//! Pure listing logic for the marketplace.
//!
//! - `entities`: records, listings, drafts
//! - `codec`: store keys and the index/record wire formats
//! - `seal`: the reversible contact tag
//! - `stats`: dashboard counters and search
//!
//! This module contains NO I/O dependencies. All external interactions
//! are abstracted through ports in the `ports` module.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod seal;
pub mod stats;

pub use codec::*;
pub use entities::*;
pub use errors::*;
pub use seal::ContactSeal;
pub use stats::*;
