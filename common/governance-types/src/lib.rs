// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod chain;
pub mod error;
pub mod format;
pub mod proposal;
pub mod serde_helpers;
pub mod transaction;
pub mod vote;

pub use chain::{ChainStats, CurrentValue, DEFAULT_GAS_PRICE};
pub use error::TypesError;
pub use proposal::{
    ExtraMetadata, Proposal, ProposalContent, ProposalDetails, ProposalId, ProposalState,
    ProposalSummary, ProposalVotes,
};
pub use transaction::{BuildTxResponse, NewProposalRequest, ProposalActionRequest, VoteRequest};
pub use vote::VoteWay;

// re-exported so that downstream crates agree on the primitive types
pub use alloy_primitives::{Address, Bytes, TxHash, U256};
