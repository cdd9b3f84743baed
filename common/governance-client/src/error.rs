// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GovernanceApiError {
    #[error("failed to send request to {url}: {source}")]
    RequestSendingFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status {status}: {body}")]
    EndpointFailure {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response received from {url}: {source}")]
    ResponseDecodeFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build internal client: {source}")]
    ClientBuildFailure {
        #[source]
        source: reqwest::Error,
    },

    #[error("provided url ({raw}) is malformed: {source}")]
    MalformedServerUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("provided url ({raw}) can't be used as a base for the api endpoints")]
    UnsupportedServerUrl { raw: String },
}

impl GovernanceApiError {
    /// Status code returned by the backend, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GovernanceApiError::EndpointFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}
