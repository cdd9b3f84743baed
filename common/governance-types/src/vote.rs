// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::TypesError;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Direction of a vote. The discriminants are the exact values expected by the governor
/// contract (and the backend building the transactions), so they must never be reordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum VoteWay {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteWay {
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for VoteWay {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteWay::Against),
            1 => Ok(VoteWay::For),
            2 => Ok(VoteWay::Abstain),
            value => Err(TypesError::UnknownVoteOrdinal { value }),
        }
    }
}

impl FromStr for VoteWay {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "for" | "yes" => Ok(VoteWay::For),
            "against" | "no" => Ok(VoteWay::Against),
            "abstain" => Ok(VoteWay::Abstain),
            _ => Err(TypesError::InvalidVoteWay { raw: s.to_string() }),
        }
    }
}

impl Display for VoteWay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteWay::Against => f.write_str("against"),
            VoteWay::For => f.write_str("for"),
            VoteWay::Abstain => f.write_str("abstain"),
        }
    }
}
