// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::intent::IntentError;
use crate::lifecycle::Action;
use crate::view::draft::DraftError;
use crate::view::scope::Cancelled;
use crate::wallet::WalletError;
use gfp_governance_client::GovernanceApiError;
use gfp_governance_types::{ProposalId, ProposalState};
use gfp_network_defaults::NetworkDefaultsError;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(
        "failed to load config file using path '{}'. detailed message: {source}", path.display()
    )]
    ConfigLoadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config file at '{}' is malformed: {source}", path.display())]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialise the config: {source}")]
    ConfigSerialisationFailure {
        #[source]
        source: toml::ser::Error,
    },

    #[error(
        "failed to save config file using path '{}'. detailed message: {source}", path.display()
    )]
    ConfigSaveFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("there already exists a config file at: {}. if you want to overwrite its content, use --force flag", path.display())]
    ExistingConfig { path: PathBuf },

    #[error("could not determine the home directory of the current user")]
    UnknownHomeDirectory,

    #[error("the provided configuration is invalid: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    NetworkDefaults(#[from] NetworkDefaultsError),

    #[error("governance backend failure: {source}")]
    ApiFailure {
        #[from]
        source: GovernanceApiError,
    },

    #[error("governance backend failure: {source}")]
    QueryFailure {
        #[from]
        source: Arc<GovernanceApiError>,
    },

    #[error("wallet failure: {source}")]
    WalletFailure {
        #[from]
        source: WalletError,
    },

    #[error("failed to submit the transaction: {source}")]
    SubmissionFailure {
        #[from]
        source: IntentError,
    },

    #[error("the proposal can't be submitted: {source}")]
    InvalidDraft {
        #[from]
        source: DraftError,
    },

    #[error("this operation requires a connected wallet")]
    WalletNotConnected,

    #[error("proposal {id} does not exist")]
    ProposalNotFound { id: ProposalId },

    #[error("'{action}' is not available for proposal {id} in state {state}")]
    ActionUnavailable {
        id: ProposalId,
        action: Action,
        state: ProposalState,
    },

    #[error("there's already a submission in progress for proposal {id}")]
    SubmissionInProgress { id: ProposalId },

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}
