//! # Ports Layer
//!
//! - **Driven Ports (Outbound)**: `ContractStore`, implemented by the adapters
//!   in this crate and consumed by the listing index.

pub mod outbound;

pub use outbound::*;
