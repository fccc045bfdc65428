//! Listing id generation.
//!
//! Ids look like `1700000000123-k3x9a0q`: the creation time in Unix
//! milliseconds, a dash, and seven random base36 characters. Other clients
//! of the same contract produce ids of this shape, so it is kept as-is.

use rand::Rng;
use shared_types::ListingId;

use crate::ports::outbound::IdGenerator;

/// Characters used for the random suffix.
pub const ID_SUFFIX_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix.
pub const ID_SUFFIX_LEN: usize = 7;

/// Id generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, now_millis: u64) -> ListingId {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_SUFFIX_ALPHABET[rng.gen_range(0..ID_SUFFIX_ALPHABET.len())] as char)
            .collect();
        ListingId::new(format!("{}-{}", now_millis, suffix))
    }
}
