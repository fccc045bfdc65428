//! # Ethereum JSON-RPC Adapter
//!
//! Drives a deployed key-value contract through a node or wallet RPC
//! endpoint.
//!
//! - Reads: `eth_call` against `latest`.
//! - Writes: `eth_sendTransaction` from the configured sender (the endpoint
//!   holds the key and signs), then `eth_getTransactionReceipt` polling until
//!   the transaction is mined or the deadline passes.

pub mod types;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Address;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use self::types::{
    from_hex, parse_quantity, to_hex, CallRequest, JsonRpcRequest, JsonRpcResponse,
    ReceiptPayload,
};
use crate::domain::abi::{self, signatures};
use crate::domain::{ContractStoreError, TxReceipt};
use crate::ports::outbound::ContractStore;

/// JSON-RPC adapter configuration.
#[derive(Debug, Clone)]
pub struct JsonRpcConfig {
    /// HTTP endpoint of the node or wallet bridge.
    pub rpc_url: String,
    /// Address of the deployed key-value contract.
    pub contract: Address,
    /// Account used as `from` for writes. Reads work without one.
    pub sender: Option<Address>,
    /// Optional gas limit; when absent the endpoint estimates.
    pub gas_limit: Option<u64>,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Delay between receipt polls.
    pub receipt_poll_interval: Duration,
    /// Give up waiting for a receipt after this long.
    pub receipt_timeout: Duration,
}

impl Default for JsonRpcConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract: Address::ZERO,
            sender: None,
            gas_limit: None,
            request_timeout: Duration::from_secs(10),
            receipt_poll_interval: Duration::from_millis(1000),
            receipt_timeout: Duration::from_secs(120),
        }
    }
}

/// Contract store backed by an Ethereum JSON-RPC endpoint.
pub struct JsonRpcContractStore {
    client: Client,
    config: JsonRpcConfig,
    request_id: AtomicU64,
}

impl JsonRpcContractStore {
    /// Create a new adapter.
    pub fn new(config: JsonRpcConfig) -> Result<Self, ContractStoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ContractStoreError::Transport(e.to_string()))?;

        info!(
            rpc_url = %config.rpc_url,
            contract = %config.contract,
            sender = ?config.sender,
            "[sm-01] JSON-RPC contract store configured"
        );

        Ok(Self {
            client,
            config,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &JsonRpcConfig {
        &self.config
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC method whose result may be `null`.
    async fn call_optional<P: Serialize + Send, R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Option<R>, ContractStoreError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());

        let response = self
            .client
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ContractStoreError::Transport(format!(
                        "cannot connect to {}",
                        self.config.rpc_url
                    ))
                } else {
                    ContractStoreError::Transport(e.to_string())
                }
            })?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ContractStoreError::Malformed(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            debug!(method, %error, "[sm-01] RPC returned error");
            return Err(ContractStoreError::from_rpc(error.code, error.message));
        }

        Ok(rpc_response.result)
    }

    /// Call a JSON-RPC method that must return a result.
    async fn call<P: Serialize + Send, R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ContractStoreError> {
        self.call_optional(method, params).await?.ok_or_else(|| {
            ContractStoreError::Malformed(format!("missing result for {}", method))
        })
    }

    async fn eth_call(&self, data: Vec<u8>) -> Result<Vec<u8>, ContractStoreError> {
        let call = CallRequest {
            from: None,
            to: self.config.contract.to_string(),
            data: to_hex(&data),
            gas: None,
        };
        let raw: String = self.call("eth_call", (call, "latest")).await?;
        from_hex(&raw).map_err(|e| ContractStoreError::Malformed(e.to_string()))
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TxReceipt, ContractStoreError> {
        let deadline = Instant::now() + self.config.receipt_timeout;

        loop {
            let receipt: Option<ReceiptPayload> = self
                .call_optional("eth_getTransactionReceipt", [tx_hash])
                .await?;

            if let Some(receipt) = receipt {
                if receipt.reverted() {
                    warn!(tx_hash, "[sm-01] setData transaction reverted");
                    return Err(ContractStoreError::Reverted {
                        tx_hash: receipt.transaction_hash,
                    });
                }
                let block_number = receipt.block_number.as_deref().and_then(parse_quantity);
                return Ok(TxReceipt::new(receipt.transaction_hash, block_number));
            }

            if Instant::now() >= deadline {
                return Err(ContractStoreError::ReceiptTimeout {
                    tx_hash: tx_hash.to_string(),
                });
            }
            tokio::time::sleep(self.config.receipt_poll_interval).await;
        }
    }
}

#[async_trait]
impl ContractStore for JsonRpcContractStore {
    async fn is_available(&self) -> Result<bool, ContractStoreError> {
        let data = abi::encode_call(signatures::IS_AVAILABLE, &[]);
        let ret = self.eth_call(data).await?;
        Ok(abi::decode_bool(&ret)?)
    }

    #[instrument(skip(self))]
    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError> {
        let data = abi::encode_call(signatures::GET_DATA, &[key.as_bytes()]);
        let ret = self.eth_call(data).await?;
        Ok(abi::decode_bytes(&ret)?)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError> {
        let sender = self.config.sender.ok_or(ContractStoreError::NoSender)?;
        let data = abi::encode_call(signatures::SET_DATA, &[key.as_bytes(), value]);
        let tx = CallRequest {
            from: Some(sender.to_string()),
            to: self.config.contract.to_string(),
            data: to_hex(&data),
            gas: self.config.gas_limit.map(|g| format!("0x{:x}", g)),
        };

        let tx_hash: String = self.call("eth_sendTransaction", [tx]).await?;
        debug!(%tx_hash, "[sm-01] setData submitted, awaiting receipt");

        let receipt = self.wait_for_receipt(&tx_hash).await?;
        info!(
            tx_hash = %receipt.tx_hash,
            block = ?receipt.block_number,
            "[sm-01] setData confirmed"
        );
        Ok(receipt)
    }
}
