//! # Solidity ABI Codec
//!
//! Just enough of the contract ABI to drive the key-value contract:
//! function selectors, dynamic `string`/`bytes` arguments, and `bytes`/`bool`
//! return values.
//!
//! ## Layout of a call with dynamic arguments
//!
//! ```text
//! selector (4)
//! head:  offset(arg0) | offset(arg1) | ...        one 32-byte word each
//! tail:  len(arg0) | arg0 padded to 32 | len(arg1) | arg1 padded | ...
//! ```
//!
//! Offsets are measured from the start of the head, not the selector.

use primitive_types::U256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// Function signatures of the key-value contract.
pub mod signatures {
    pub const IS_AVAILABLE: &str = "isAvailable()";
    pub const GET_DATA: &str = "getData(string)";
    pub const SET_DATA: &str = "setData(string,bytes)";
}

/// Errors raised while decoding return data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Return data shorter than the layout requires.
    #[error("return data too short: need {needed} bytes, have {available}")]
    TooShort { needed: usize, available: usize },

    /// An offset or length word does not fit in memory.
    #[error("ABI word out of range")]
    Overflow,
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// Encode a call whose arguments are all dynamic (`string` or `bytes`).
///
/// Both types share the same encoding, so the caller passes raw bytes.
pub fn encode_call(signature: &str, args: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + args.len() * WORD * 3);
    out.extend_from_slice(&selector(signature));
    out.extend_from_slice(&encode_dynamic_args(args));
    out
}

/// Encode the head and tail of a dynamic-only argument list.
pub fn encode_dynamic_args(args: &[&[u8]]) -> Vec<u8> {
    let mut head = Vec::with_capacity(args.len() * WORD);
    let mut tail = Vec::new();
    let head_len = args.len() * WORD;

    for arg in args {
        head.extend_from_slice(&usize_word(head_len + tail.len()));
        tail.extend_from_slice(&usize_word(arg.len()));
        tail.extend_from_slice(arg);
        tail.resize(tail.len() + padding(arg.len()), 0);
    }

    head.extend_from_slice(&tail);
    head
}

/// Decode a single `bytes` (or `string`) return value.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>, AbiError> {
    decode_dynamic_at(data, 0)
}

/// Decode the dynamic value whose head slot is `index`.
///
/// `data` starts at the head (selector already stripped for calldata).
pub fn decode_dynamic_at(data: &[u8], index: usize) -> Result<Vec<u8>, AbiError> {
    let head_pos = index.checked_mul(WORD).ok_or(AbiError::Overflow)?;
    let offset = read_usize(data, head_pos)?;
    let len = read_usize(data, offset)?;
    let start = offset.checked_add(WORD).ok_or(AbiError::Overflow)?;
    let end = start.checked_add(len).ok_or(AbiError::Overflow)?;
    if end > data.len() {
        return Err(AbiError::TooShort {
            needed: end,
            available: data.len(),
        });
    }
    Ok(data[start..end].to_vec())
}

/// Decode a single `bool` return value. Any non-zero word is true.
pub fn decode_bool(data: &[u8]) -> Result<bool, AbiError> {
    let word = read_word(data, 0)?;
    Ok(!word.is_zero())
}

/// Encode a `bytes` return value, as the contract would.
pub fn encode_bytes_return(value: &[u8]) -> Vec<u8> {
    encode_dynamic_args(&[value])
}

/// Encode a `bool` return value.
pub fn encode_bool_return(value: bool) -> Vec<u8> {
    usize_word(usize::from(value)).to_vec()
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    U256::from(value).to_big_endian(&mut word);
    word
}

fn read_word(data: &[u8], pos: usize) -> Result<U256, AbiError> {
    let end = pos.checked_add(WORD).ok_or(AbiError::Overflow)?;
    if end > data.len() {
        return Err(AbiError::TooShort {
            needed: end,
            available: data.len(),
        });
    }
    Ok(U256::from_big_endian(&data[pos..end]))
}

fn read_usize(data: &[u8], pos: usize) -> Result<usize, AbiError> {
    let word = read_word(data, pos)?;
    if word > U256::from(u64::MAX) {
        return Err(AbiError::Overflow);
    }
    usize::try_from(word.low_u64()).map_err(|_| AbiError::Overflow)
}
