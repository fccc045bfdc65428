//! # Adapters Layer
//!
//! Production implementations of the driven ports that are not the store:
//! a wall clock and a random listing id generator.

mod id;
mod time;

pub use id::{RandomIdGenerator, ID_SUFFIX_ALPHABET, ID_SUFFIX_LEN};
pub use time::SystemTimeSource;
