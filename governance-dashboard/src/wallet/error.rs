// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use gfp_governance_types::TxHash;
use reqwest::StatusCode;
use thiserror::Error;

/// JSON-RPC error code used by wallets when the user declined the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// JSON-RPC error code returned when the endpoint does not support the method.
pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet provider has been configured")]
    NoProvider,

    #[error("the wallet did not expose any accounts")]
    NoAccounts,

    #[error("the request was rejected by the user: {message}")]
    UserRejected { message: String },

    #[error("'{method}' call failed with code {code}: {message}")]
    RpcFailure {
        method: String,
        code: i64,
        message: String,
    },

    #[error("failed to send '{method}' request to {url}: {source}")]
    RequestSendingFailure {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{method}' request to {url} failed with status {status}")]
    EndpointFailure {
        method: String,
        url: String,
        status: StatusCode,
    },

    #[error("failed to decode the response to '{method}': {source}")]
    ResponseDecodeFailure {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build internal client: {source}")]
    ClientBuildFailure {
        #[source]
        source: reqwest::Error,
    },

    #[error("the wallet is connected to chain {actual} while {expected} was expected")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("transaction {tx_hash} has been reverted")]
    TransactionReverted { tx_hash: TxHash },
}

impl WalletError {
    pub fn from_rpc_error(method: impl Into<String>, code: i64, message: String) -> Self {
        if code == USER_REJECTED_REQUEST {
            WalletError::UserRejected { message }
        } else {
            WalletError::RpcFailure {
                method: method.into(),
                code,
                message,
            }
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, WalletError::UserRejected { .. })
    }
}
