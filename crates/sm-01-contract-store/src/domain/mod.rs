//! # Domain Layer
//!
//! Pure logic for talking to the key-value contract.
//!
//! This module contains NO I/O dependencies. All external interactions
//! are abstracted through ports in the `ports` module.

pub mod abi;
pub mod errors;
pub mod value_objects;

pub use abi::AbiError;
pub use errors::*;
pub use value_objects::*;
