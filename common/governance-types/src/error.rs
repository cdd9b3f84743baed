// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("'{raw}' is not a valid vote direction. expected one of: for, against, abstain")]
    InvalidVoteWay { raw: String },

    #[error("{value} does not correspond to any vote direction")]
    UnknownVoteOrdinal { value: u8 },
}
