//! # Market Configuration
//!
//! Resolution order, later wins:
//!
//! 1. `MarketConfig::default()`
//! 2. Environment variables (`SM_*`)
//! 3. Command line flags
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `SM_STORE` | `memory`, `file` or `rpc` |
//! | `SM_RPC_URL` | JSON-RPC endpoint for the `rpc` store |
//! | `SM_CONTRACT_ADDRESS` | Deployed key-value contract |
//! | `SM_ACCOUNT` | Account that signs writes |
//! | `SM_DATA_FILE` | Path of the `file` store |
//! | `SM_RECEIPT_TIMEOUT_SECS` | Give up waiting for a receipt after this |
//! | `SM_POLL_INTERVAL_MS` | Delay between receipt polls |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use shared_types::{Address, AddressError};
use thiserror::Error;

pub const ENV_STORE: &str = "SM_STORE";
pub const ENV_RPC_URL: &str = "SM_RPC_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "SM_CONTRACT_ADDRESS";
pub const ENV_ACCOUNT: &str = "SM_ACCOUNT";
pub const ENV_DATA_FILE: &str = "SM_DATA_FILE";
pub const ENV_RECEIPT_TIMEOUT_SECS: &str = "SM_RECEIPT_TIMEOUT_SECS";
pub const ENV_POLL_INTERVAL_MS: &str = "SM_POLL_INTERVAL_MS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown store kind '{0}' (expected memory, file or rpc)")]
    UnknownStore(String),

    #[error("{name} is not a valid address: {source}")]
    InvalidAddress {
        name: &'static str,
        #[source]
        source: AddressError,
    },

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("the rpc store needs a contract address (set SM_CONTRACT_ADDRESS or --contract)")]
    MissingContract,

    #[error("the rpc store needs an endpoint URL")]
    MissingRpcUrl,
}

/// Which contract store backs the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Process-local, lost on exit.
    Memory,
    /// Length-prefixed binary file on disk.
    #[default]
    File,
    /// Deployed contract over Ethereum JSON-RPC.
    Rpc,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rpc" | "json-rpc" => Ok(Self::Rpc),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Rpc => "rpc",
        })
    }
}

/// Complete CLI configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub store: StoreKind,
    pub rpc_url: String,
    pub contract: Option<Address>,
    pub account: Option<Address>,
    pub data_file: PathBuf,
    pub receipt_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract: None,
            account: None,
            data_file: PathBuf::from("skill-market.db"),
            receipt_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_millis(1000),
        }
    }
}

impl MarketConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `SM_*`
    /// variable. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(store) = get(ENV_STORE) {
            config.store = store.parse()?;
        }
        if let Some(url) = get(ENV_RPC_URL) {
            config.rpc_url = url;
        }
        if let Some(contract) = get(ENV_CONTRACT_ADDRESS) {
            config.contract = Some(parse_address(ENV_CONTRACT_ADDRESS, &contract)?);
        }
        if let Some(account) = get(ENV_ACCOUNT) {
            config.account = Some(parse_address(ENV_ACCOUNT, &account)?);
        }
        if let Some(path) = get(ENV_DATA_FILE) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(secs) = get(ENV_RECEIPT_TIMEOUT_SECS) {
            config.receipt_timeout =
                Duration::from_secs(parse_positive(ENV_RECEIPT_TIMEOUT_SECS, &secs)?);
        }
        if let Some(ms) = get(ENV_POLL_INTERVAL_MS) {
            config.poll_interval = Duration::from_millis(parse_positive(ENV_POLL_INTERVAL_MS, &ms)?);
        }

        Ok(config)
    }

    /// Check that the selected store has what it needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store == StoreKind::Rpc {
            if self.rpc_url.trim().is_empty() {
                return Err(ConfigError::MissingRpcUrl);
            }
            if self.contract.is_none() {
                return Err(ConfigError::MissingContract);
            }
        }
        Ok(())
    }
}

pub fn parse_address(name: &'static str, value: &str) -> Result<Address, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidAddress { name, source })
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
