// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::wallet::{TransactionReceipt, TransactionRequest, WalletError, WalletProvider};
use alloy_primitives::U64;
use alloy_rlp::{Encodable, Header};
use async_trait::async_trait;
use gfp_governance_client::{GovernanceApi, GovernanceApiError};
use gfp_governance_types::{
    Address, BuildTxResponse, ChainStats, CurrentValue, NewProposalRequest, ProposalActionRequest,
    ProposalDetails, ProposalId, ProposalSummary, TxHash, VoteRequest, U256,
};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn user() -> Address {
    Address::repeat_byte(0x11)
}

pub(crate) fn governor() -> Address {
    Address::repeat_byte(0xab)
}

pub(crate) const CALL_DATA: &[u8] = &[0xde, 0xad, 0xbe, 0xef, 0x01, 0x02];

fn rlp_list(payload: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    Header {
        list: true,
        payload_length: payload.len(),
    }
    .encode(&mut out);
    out.extend(payload);
    out
}

fn encode_destination(to: Option<Address>, out: &mut Vec<u8>) {
    match to {
        Some(address) => address.encode(out),
        None => [0u8; 0][..].encode(out),
    }
}

pub(crate) fn eip1559_tx(to: Option<Address>, value: U256, data: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    11155111u64.encode(&mut payload);
    3u64.encode(&mut payload);
    U256::from(1_000_000_000u64).encode(&mut payload);
    U256::from(20_000_000_000u64).encode(&mut payload);
    300_000u64.encode(&mut payload);
    encode_destination(to, &mut payload);
    value.encode(&mut payload);
    data.encode(&mut payload);
    // empty access list
    payload.extend(rlp_list(Vec::new()));

    let mut out = vec![0x02];
    out.extend(rlp_list(payload));
    out
}

pub(crate) fn legacy_tx(to: Option<Address>, value: U256, data: &[u8], chain_id: u64) -> Vec<u8> {
    let mut payload = Vec::new();
    7u64.encode(&mut payload);
    U256::from(100_000_000u64).encode(&mut payload);
    21_000u64.encode(&mut payload);
    encode_destination(to, &mut payload);
    value.encode(&mut payload);
    data.encode(&mut payload);
    // unsigned EIP-155 form: chain id followed by empty signature values
    chain_id.encode(&mut payload);
    0u64.encode(&mut payload);
    0u64.encode(&mut payload);
    rlp_list(payload)
}

pub(crate) fn hex_prefixed(raw: &[u8]) -> String {
    format!("0x{}", hex::encode(raw))
}

pub(crate) struct MockGovernanceApi {
    pub(crate) proposals: Mutex<Vec<ProposalSummary>>,
    pub(crate) details: Mutex<HashMap<ProposalId, ProposalDetails>>,
    pub(crate) stats: Mutex<ChainStats>,
    pub(crate) current_value: Mutex<CurrentValue>,
    pub(crate) unsigned_tx: Mutex<String>,
    pub(crate) estimated_gas: Option<u64>,
    pub(crate) fail_build: bool,
    pub(crate) build_delay: Duration,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl Default for MockGovernanceApi {
    fn default() -> Self {
        MockGovernanceApi {
            proposals: Default::default(),
            details: Default::default(),
            stats: Mutex::new(ChainStats {
                chain_id: Some(11155111),
                current_block: 1_000,
                gas_price: U256::from(2_000_000_000u64),
            }),
            current_value: Default::default(),
            unsigned_tx: Mutex::new(hex_prefixed(&eip1559_tx(
                Some(governor()),
                U256::from(5u64),
                CALL_DATA,
            ))),
            estimated_gas: Some(250_000),
            fail_build: false,
            build_delay: Duration::ZERO,
            calls: Default::default(),
        }
    }
}

impl MockGovernanceApi {
    pub(crate) fn with_proposal(self, summary: serde_json::Value, details: serde_json::Value) -> Self {
        let summary: ProposalSummary = serde_json::from_value(summary).unwrap();
        let details: ProposalDetails = serde_json::from_value(details).unwrap();
        self.details
            .lock()
            .unwrap()
            .insert(summary.id().clone(), details);
        self.proposals.lock().unwrap().push(summary);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call)
    }

    async fn build(&self, call: String) -> Result<BuildTxResponse, GovernanceApiError> {
        self.record(call);
        tokio::time::sleep(self.build_delay).await;
        if self.fail_build {
            return Err(GovernanceApiError::EndpointFailure {
                url: "http://backend.mock/governance/build-tx".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "failed to build the transaction".to_string(),
            });
        }
        Ok(BuildTxResponse {
            unsigned_tx: self.unsigned_tx.lock().unwrap().clone(),
            is_serialized: true,
            estimated_gas: self.estimated_gas,
        })
    }
}

#[async_trait]
impl GovernanceApi for MockGovernanceApi {
    async fn get_proposals(&self) -> Result<Vec<ProposalSummary>, GovernanceApiError> {
        self.record("proposals".to_string());
        Ok(self.proposals.lock().unwrap().clone())
    }

    async fn get_proposal(&self, id: &ProposalId) -> Result<ProposalDetails, GovernanceApiError> {
        self.record(format!("proposal:{id}"));
        self.details.lock().unwrap().get(id).cloned().ok_or_else(|| {
            GovernanceApiError::EndpointFailure {
                url: format!("http://backend.mock/governance/proposals/{id}"),
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            }
        })
    }

    async fn get_current_value(&self) -> Result<CurrentValue, GovernanceApiError> {
        self.record("current-value".to_string());
        Ok(self.current_value.lock().unwrap().clone())
    }

    async fn get_network_stats(&self) -> Result<ChainStats, GovernanceApiError> {
        self.record("stats".to_string());
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn build_proposal_tx(
        &self,
        request: &NewProposalRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build(format!("build-tx/proposal:{}", request.title))
            .await
    }

    async fn build_vote_tx(
        &self,
        request: &VoteRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build(format!(
            "build-tx/vote:{}:{}",
            request.proposal_id,
            request.vote_way.ordinal()
        ))
        .await
    }

    async fn build_queue_tx(
        &self,
        request: &ProposalActionRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build(format!("build-tx/queue:{}", request.proposal_id))
            .await
    }

    async fn build_execute_tx(
        &self,
        request: &ProposalActionRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build(format!("build-tx/execute:{}", request.proposal_id))
            .await
    }
}

pub(crate) struct MockWallet {
    pub(crate) accounts: Vec<Address>,
    pub(crate) balance: U256,
    pub(crate) reject_connection: bool,
    pub(crate) reject_signing: bool,
    pub(crate) reverted: bool,
    pub(crate) send_delay: Duration,
    pub(crate) sent: Mutex<Vec<TransactionRequest>>,
    pub(crate) awaited_receipts: Mutex<Vec<TxHash>>,
    pub(crate) next_hash: AtomicU8,
}

impl Default for MockWallet {
    fn default() -> Self {
        MockWallet {
            accounts: vec![user()],
            balance: U256::from(1_500_000_000_000_000_000u64),
            reject_connection: false,
            reject_signing: false,
            reverted: false,
            send_delay: Duration::ZERO,
            sent: Default::default(),
            awaited_receipts: Default::default(),
            next_hash: AtomicU8::new(1),
        }
    }
}

impl MockWallet {
    pub(crate) fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn awaited_receipts(&self) -> Vec<TxHash> {
        self.awaited_receipts.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.reject_connection {
            return Err(WalletError::UserRejected {
                message: "User rejected the request.".to_string(),
            });
        }
        Ok(self.accounts.clone())
    }

    async fn prepare_transaction_request(
        &self,
        mut request: TransactionRequest,
    ) -> Result<TransactionRequest, WalletError> {
        request.nonce = Some(U64::from(3));
        request.chain_id = Some(U64::from(11155111));
        if request.gas.is_none() {
            request.gas = Some(U64::from(90_000));
        }
        Ok(request)
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        tokio::time::sleep(self.send_delay).await;
        if self.reject_signing {
            return Err(WalletError::UserRejected {
                message: "User denied transaction signature.".to_string(),
            });
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(TxHash::repeat_byte(
            self.next_hash.fetch_add(1, Ordering::SeqCst),
        ))
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, WalletError> {
        Ok(self.balance)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, WalletError> {
        self.awaited_receipts.lock().unwrap().push(tx_hash);
        Ok(TransactionReceipt {
            transaction_hash: tx_hash,
            block_number: Some(U64::from(1_001)),
            gas_used: Some(U256::from(80_000u64)),
            status: Some(U64::from(u64::from(!self.reverted))),
        })
    }
}
