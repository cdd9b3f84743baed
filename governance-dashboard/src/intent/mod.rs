// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Turns user intents into on-chain transactions: the backend builds the unsigned transaction,
//! the connected wallet signs and broadcasts it.

use crate::wallet::{TransactionReceipt, TransactionRequest, WalletContext, WalletError};
use alloy_primitives::U64;
use gfp_governance_client::{GovernanceApi, GovernanceApiError};
use gfp_governance_types::{
    BuildTxResponse, NewProposalRequest, ProposalActionRequest, ProposalId, TxHash, VoteRequest,
    VoteWay, U256,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub mod decode;
pub mod error;

pub use decode::{decode_unsigned_tx, DecodeError, DecodedTransaction};
pub use error::IntentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    CreateProposal,
    Vote,
    Queue,
    Execute,
}

impl IntentKind {
    /// Queue and execute transactions are submitted with the gas limit estimated by the backend.
    pub fn uses_estimated_gas(&self) -> bool {
        matches!(self, IntentKind::Queue | IntentKind::Execute)
    }
}

impl Display for IntentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentKind::CreateProposal => f.write_str("proposal"),
            IntentKind::Vote => f.write_str("vote"),
            IntentKind::Queue => f.write_str("queue"),
            IntentKind::Execute => f.write_str("execute"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateProposal(NewProposalRequest),
    Vote(VoteRequest),
    Queue(ProposalActionRequest),
    Execute(ProposalActionRequest),
}

impl Intent {
    pub fn vote(proposal_id: ProposalId, vote_way: VoteWay) -> Self {
        Intent::Vote(VoteRequest {
            proposal_id,
            vote_way,
        })
    }

    pub fn queue(proposal_id: ProposalId) -> Self {
        Intent::Queue(ProposalActionRequest { proposal_id })
    }

    pub fn execute(proposal_id: ProposalId) -> Self {
        Intent::Execute(ProposalActionRequest { proposal_id })
    }

    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::CreateProposal(_) => IntentKind::CreateProposal,
            Intent::Vote(_) => IntentKind::Vote,
            Intent::Queue(_) => IntentKind::Queue,
            Intent::Execute(_) => IntentKind::Execute,
        }
    }

    pub fn proposal_id(&self) -> Option<&ProposalId> {
        match self {
            Intent::CreateProposal(_) => None,
            Intent::Vote(request) => Some(&request.proposal_id),
            Intent::Queue(request) | Intent::Execute(request) => Some(&request.proposal_id),
        }
    }
}

/// Whether a submission completes once the transaction has been broadcast,
/// or only after it has been included in a block. Applies to every intent.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationMode {
    #[default]
    AwaitReceipt,
    BroadcastOnly,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedIntent {
    pub kind: IntentKind,
    pub tx_hash: TxHash,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<TransactionReceipt>,
}

impl Display for SubmittedIntent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} transaction {}", self.kind, self.tx_hash)?;
        match self.receipt.as_ref().and_then(|receipt| receipt.block_number) {
            Some(block) => write!(f, " has been included in block {block}"),
            None => write!(f, " has been broadcast"),
        }
    }
}

#[derive(Clone)]
pub struct IntentBuilder {
    api: Arc<dyn GovernanceApi>,
    wallet: WalletContext,
    confirmation: ConfirmationMode,
}

impl IntentBuilder {
    pub fn new(
        api: Arc<dyn GovernanceApi>,
        wallet: WalletContext,
        confirmation: ConfirmationMode,
    ) -> Self {
        IntentBuilder {
            api,
            wallet,
            confirmation,
        }
    }

    async fn request_unsigned_tx(
        &self,
        intent: &Intent,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        match intent {
            Intent::CreateProposal(request) => self.api.build_proposal_tx(request).await,
            Intent::Vote(request) => self.api.build_vote_tx(request).await,
            Intent::Queue(request) => self.api.build_queue_tx(request).await,
            Intent::Execute(request) => self.api.build_execute_tx(request).await,
        }
    }

    /// Has the backend build the transaction corresponding to the intent and submits it
    /// through the connected wallet. No local state is modified.
    #[instrument(skip_all, fields(kind = %intent.kind()))]
    pub async fn build_and_submit(&self, intent: Intent) -> Result<SubmittedIntent, IntentError> {
        let kind = intent.kind();
        let wallet = self
            .wallet
            .connected()
            .await
            .ok_or(IntentError::WalletNotConnected)?;

        let response = self
            .request_unsigned_tx(&intent)
            .await
            .map_err(|source| IntentError::BackendFailure { kind, source })?;

        let decoded = decode_unsigned_tx(&response.unsigned_tx)?;
        let to = decoded.to.ok_or(IntentError::MissingDestination)?;
        debug!("backend built a {:?} transaction to {to}", decoded.tx_type);

        let gas = if kind.uses_estimated_gas() {
            response.estimated_gas.map(U64::from)
        } else {
            None
        };

        let request = TransactionRequest {
            from: wallet.address,
            to: Some(to),
            value: U256::ZERO,
            data: decoded.input,
            gas,
            gas_price: Some(self.wallet.chain_stats().await.gas_price),
            nonce: None,
            chain_id: None,
        };

        let request = wallet.provider.prepare_transaction_request(request).await?;
        let tx_hash = wallet.provider.send_transaction(&request).await?;
        info!("broadcast {kind} transaction {tx_hash}");

        let receipt = match self.confirmation {
            ConfirmationMode::BroadcastOnly => None,
            ConfirmationMode::AwaitReceipt => {
                let receipt = wallet.provider.wait_for_receipt(tx_hash).await?;
                if receipt.reverted() {
                    return Err(WalletError::TransactionReverted { tx_hash }.into());
                }
                info!("{kind} transaction {tx_hash} has been confirmed");
                Some(receipt)
            }
        };

        Ok(SubmittedIntent {
            kind,
            tx_hash,
            receipt,
        })
    }
}
