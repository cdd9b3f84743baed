// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::proposal::ProposalId;
use crate::serde_helpers::opt_u64_lenient;
use crate::vote::VoteWay;
use serde::{Deserialize, Serialize};

/// Request body of `POST /governance/build-tx/proposal`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProposalRequest {
    pub title: String,
    pub description: String,
    pub new_value: u32,
}

/// Request body of `POST /governance/build-tx/vote`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub proposal_id: ProposalId,
    pub vote_way: VoteWay,
}

/// Request body of both `POST /governance/build-tx/queue` and `POST /governance/build-tx/execute`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalActionRequest {
    pub proposal_id: ProposalId,
}

/// Unsigned transaction prepared by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTxResponse {
    /// Hex encoded, RLP serialised, unsigned transaction.
    pub unsigned_tx: String,

    #[serde(default)]
    pub is_serialized: bool,

    #[serde(default, deserialize_with = "opt_u64_lenient::deserialize")]
    pub estimated_gas: Option<u64>,
}
