//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: `ListingMarketApi`, consumed by the CLI.
//! - **Driven Ports (Outbound)**: `TimeSource`, `IdGenerator`, plus the
//!   `ContractStore` port re-used from `sm-01-contract-store`.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
