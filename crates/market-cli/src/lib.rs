//! Skill Market command line.
//!
//! Configuration, store wiring and terminal rendering used by the
//! `skill-market` binary.

pub mod config;
pub mod render;
pub mod wiring;

pub use config::{ConfigError, MarketConfig, StoreKind};
pub use wiring::{build_marketplace, build_store, CliMarketplace};
