// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::serde_helpers::{id_lenient, opt_i64_lenient, opt_u64_lenient, u256_lenient};
use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Any additional, not explicitly modelled, fields attached to a proposal by the upstream indexer.
pub type ExtraMetadata = BTreeMap<String, serde_json::Value>;

/// Mirrors the state machine of the on-chain governor contract.
/// The discriminants correspond to the values returned by `state(proposalId)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ProposalState {
    Pending = 0,
    Active = 1,
    Canceled = 2,
    Defeated = 3,
    Succeeded = 4,
    Queued = 5,
    Expired = 6,
    Executed = 7,
}

impl ProposalState {
    pub const ALL: [ProposalState; 8] = [
        ProposalState::Pending,
        ProposalState::Active,
        ProposalState::Canceled,
        ProposalState::Defeated,
        ProposalState::Succeeded,
        ProposalState::Queued,
        ProposalState::Expired,
        ProposalState::Executed,
    ];

    /// No further transitions are possible from a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalState::Canceled
                | ProposalState::Defeated
                | ProposalState::Expired
                | ProposalState::Executed
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProposalState::Pending => "Pending",
            ProposalState::Active => "Active",
            ProposalState::Canceled => "Canceled",
            ProposalState::Defeated => "Defeated",
            ProposalState::Succeeded => "Succeeded",
            ProposalState::Queued => "Queued",
            ProposalState::Expired => "Expired",
            ProposalState::Executed => "Executed",
        }
    }
}

impl Display for ProposalState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl<'de> Deserialize<'de> for ProposalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        id_lenient::deserialize(deserializer).map(ProposalId)
    }
}

impl ProposalId {
    pub fn new(id: impl Into<String>) -> Self {
        ProposalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProposalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProposalId {
    fn from(value: &str) -> Self {
        ProposalId::new(value)
    }
}

impl From<String> for ProposalId {
    fn from(value: String) -> Self {
        ProposalId(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalContent {
    pub proposal_id: ProposalId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraMetadata,
}

impl ProposalContent {
    /// Resolves the displayed title and description of the proposal.
    ///
    /// An explicit title always wins. Otherwise, following the governor convention,
    /// the first line of the description (with any markdown heading markers removed)
    /// becomes the title and the remainder becomes the body.
    pub fn title_and_description(&self) -> (String, String) {
        let description = self.description.as_deref().unwrap_or_default().trim();

        if let Some(title) = self.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                return (title.to_string(), description.to_string());
            }
        }

        let mut lines = description.splitn(2, '\n');
        let first = lines
            .next()
            .unwrap_or_default()
            .trim()
            .trim_start_matches('#')
            .trim();
        let rest = lines.next().unwrap_or_default().trim();

        if first.is_empty() {
            (format!("Proposal {}", self.proposal_id), rest.to_string())
        } else {
            (first.to_string(), rest.to_string())
        }
    }
}

/// An entry of the proposal list, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub content: ProposalContent,

    #[serde(flatten)]
    pub extra: ExtraMetadata,
}

impl ProposalSummary {
    pub fn id(&self) -> &ProposalId {
        &self.content.proposal_id
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalVotes {
    #[serde(default, deserialize_with = "u256_lenient::deserialize")]
    pub for_votes: U256,

    #[serde(default, deserialize_with = "u256_lenient::deserialize")]
    pub against_votes: U256,

    #[serde(default, deserialize_with = "u256_lenient::deserialize")]
    pub abstain_votes: U256,
}

/// On-chain details of a single proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDetails {
    pub state: ProposalState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,

    /// Block number at which voting closes.
    #[serde(default, deserialize_with = "opt_u64_lenient::deserialize")]
    pub block_deadline: Option<u64>,

    /// Unix timestamp (in seconds) from which a queued proposal can be executed.
    #[serde(default, deserialize_with = "opt_i64_lenient::deserialize")]
    pub execution_eta: Option<i64>,

    #[serde(default)]
    pub proposal_votes: ProposalVotes,

    #[serde(flatten)]
    pub extra: ExtraMetadata,
}

/// Immutable snapshot of a proposal, assembled from its list entry and on-chain details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub state: ProposalState,
    pub block_deadline: Option<u64>,
    pub execution_eta: Option<i64>,
    pub votes: ProposalVotes,
}

impl Proposal {
    pub fn new(summary: &ProposalSummary, details: &ProposalDetails) -> Self {
        let (title, description) = summary.content.title_and_description();

        Proposal {
            id: summary.id().clone(),
            title,
            description,
            state: details.state,
            block_deadline: details.block_deadline,
            // an eta of 0 is what the governor reports for proposals that were never queued
            execution_eta: details.execution_eta.filter(|eta| *eta > 0),
            votes: details.proposal_votes.clone(),
        }
    }
}
