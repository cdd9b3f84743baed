// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::intent::decode::DecodeError;
use crate::intent::IntentKind;
use crate::wallet::WalletError;
use gfp_governance_client::GovernanceApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("no wallet is connected")]
    WalletNotConnected,

    #[error("the backend failed to build the {kind} transaction: {source}")]
    BackendFailure {
        kind: IntentKind,
        #[source]
        source: GovernanceApiError,
    },

    #[error("the backend returned a malformed transaction: {source}")]
    MalformedTransaction {
        #[from]
        source: DecodeError,
    },

    #[error("the backend returned a transaction without any destination")]
    MissingDestination,

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl IntentError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, IntentError::Wallet(err) if err.is_user_rejection())
    }
}
