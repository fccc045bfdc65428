//! # Contract Store Subsystem (sm-01)
//!
//! The Contract Store is the marketplace's only persistence: a deployed
//! contract exposing a string-keyed byte store.
//!
//! ```text
//! isAvailable()                 -> bool
//! getData(string key)           -> bytes      (empty when absent)
//! setData(string key, bytes v)  -> transaction (awaited until mined)
//! ```
//!
//! ## Store Semantics
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Absent key | `getData` returns empty bytes, never an error |
//! | Write | Last writer wins, whole value replaced |
//! | Atomicity | Single key only; no compare-and-swap, no versioning |
//! | Ordering | Writes are awaited until confirmed before returning |
//!
//! Anything layered on top (indexes, status machines) inherits the
//! read-modify-write hazards of a store without conditional writes.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): ABI codec, receipts, errors. No I/O.
//! - **Ports Layer** (`ports/`): the `ContractStore` driven port.
//! - **Adapters Layer** (`adapters/`): in-memory, file-backed and Ethereum
//!   JSON-RPC implementations of the port.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{abi, AbiError, ContractStoreError, TxReceipt};
pub use ports::ContractStore;

pub use adapters::{FileBackedContractStore, InMemoryContractStore};

#[cfg(feature = "json-rpc")]
pub use adapters::{JsonRpcConfig, JsonRpcContractStore};
