// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::wallet::error::{WalletError, METHOD_NOT_FOUND};
use crate::wallet::provider::{TransactionReceipt, TransactionRequest, WalletProvider};
use alloy_primitives::U64;
use async_trait::async_trait;
use gfp_governance_types::{Address, TxHash, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,

    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Wallet reachable through an EIP-1193 style JSON-RPC endpoint
/// (e.g. a local node with unlocked accounts or a desktop wallet exposing RPC).
pub struct JsonRpcWallet {
    rpc_url: Url,
    inner_client: reqwest::Client,
    next_id: AtomicU64,
    expected_chain_id: Option<u64>,
    receipt_poll_interval: Duration,
}

impl JsonRpcWallet {
    pub fn new(rpc_url: Url) -> Result<Self, WalletError> {
        let inner_client = reqwest::ClientBuilder::new()
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|source| WalletError::ClientBuildFailure { source })?;

        Ok(JsonRpcWallet {
            rpc_url,
            inner_client,
            next_id: AtomicU64::new(1),
            expected_chain_id: None,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        })
    }

    #[must_use]
    pub fn with_expected_chain_id(mut self, chain_id: u64) -> Self {
        self.expected_chain_id = Some(chain_id);
        self
    }

    #[must_use]
    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        trace!("calling '{method}' on {}", self.rpc_url);

        let response = self
            .inner_client
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|source| WalletError::RequestSendingFailure {
                method: method.to_string(),
                url: self.rpc_url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::EndpointFailure {
                method: method.to_string(),
                url: self.rpc_url.to_string(),
                status,
            });
        }

        let raw = response
            .bytes()
            .await
            .map_err(|source| WalletError::RequestSendingFailure {
                method: method.to_string(),
                url: self.rpc_url.to_string(),
                source,
            })?;

        let decoded: RpcResponse =
            serde_json::from_slice(&raw).map_err(|source| WalletError::ResponseDecodeFailure {
                method: method.to_string(),
                source,
            })?;

        if let Some(error) = decoded.error {
            return Err(WalletError::from_rpc_error(method, error.code, error.message));
        }

        serde_json::from_value(decoded.result).map_err(|source| {
            WalletError::ResponseDecodeFailure {
                method: method.to_string(),
                source,
            }
        })
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let chain_id: U64 = self.call("eth_chainId", json!([])).await?;
        Ok(chain_id.to::<u64>())
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let accounts = match self.call("eth_requestAccounts", json!([])).await {
            Ok(accounts) => accounts,
            // plain nodes don't implement the wallet permission methods
            Err(WalletError::RpcFailure { code, .. }) if code == METHOD_NOT_FOUND => {
                debug!("eth_requestAccounts is not supported, falling back to eth_accounts");
                self.call("eth_accounts", json!([])).await?
            }
            Err(err) => return Err(err),
        };

        if let Some(expected) = self.expected_chain_id {
            let actual = self.chain_id().await?;
            if actual != expected {
                return Err(WalletError::ChainMismatch { expected, actual });
            }
        }

        Ok(accounts)
    }

    async fn prepare_transaction_request(
        &self,
        mut request: TransactionRequest,
    ) -> Result<TransactionRequest, WalletError> {
        if request.chain_id.is_none() {
            request.chain_id = Some(U64::from(self.chain_id().await?));
        }

        if request.nonce.is_none() {
            let nonce: U64 = self
                .call("eth_getTransactionCount", json!([request.from, "pending"]))
                .await?;
            request.nonce = Some(nonce);
        }

        if request.gas.is_none() {
            let gas: U64 = self.call("eth_estimateGas", json!([&request])).await?;
            request.gas = Some(gas);
        }

        Ok(request)
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        self.call("eth_sendTransaction", json!([request])).await
    }

    async fn get_balance(&self, address: Address) -> Result<U256, WalletError> {
        self.call("eth_getBalance", json!([address, "latest"])).await
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, WalletError> {
        loop {
            let receipt: Option<TransactionReceipt> = self
                .call("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;

            match receipt {
                Some(receipt) => {
                    if receipt.reverted() {
                        warn!("transaction {tx_hash} has been included, but it got reverted");
                    }
                    return Ok(receipt);
                }
                None => {
                    trace!("transaction {tx_hash} is still pending");
                    tokio::time::sleep(self.receipt_poll_interval).await
                }
            }
        }
    }
}
