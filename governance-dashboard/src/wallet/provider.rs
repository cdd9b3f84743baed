// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::wallet::error::WalletError;
use alloy_primitives::U64;
use async_trait::async_trait;
use gfp_governance_types::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

/// Transaction in the shape expected by `eth_sendTransaction`.
/// Quantities are serialised as hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,

    pub value: U256,

    pub data: Bytes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<U64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,

    #[serde(default)]
    pub block_number: Option<U64>,

    #[serde(default)]
    pub gas_used: Option<U256>,

    /// `1` for success, `0` for failure. Absent for pre-byzantium receipts.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn reverted(&self) -> bool {
        self.status.is_some_and(|status| status.is_zero())
    }
}

/// Capabilities required from the user's wallet. The wallet is the only component
/// with access to the signing keys.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Asks the wallet to expose its accounts. This might prompt the user for approval.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Fills in any missing fields (nonce, chain id, gas limit) of the request.
    async fn prepare_transaction_request(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionRequest, WalletError>;

    /// Has the wallet sign and broadcast the transaction.
    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError>;

    async fn get_balance(&self, address: Address) -> Result<U256, WalletError>;

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, WalletError>;
}
