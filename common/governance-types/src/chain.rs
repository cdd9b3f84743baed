// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::serde_helpers::{opt_f64_lenient, opt_u64_lenient, u256_lenient, u64_lenient};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Gas price (in wei) assumed until the network statistics are retrieved for the first time.
pub const DEFAULT_GAS_PRICE: u64 = 100_000_000;

/// Periodically refreshed parameters of the network the dashboard operates on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStats {
    #[serde(default, deserialize_with = "opt_u64_lenient::deserialize")]
    pub chain_id: Option<u64>,

    #[serde(default, deserialize_with = "u64_lenient::deserialize")]
    pub current_block: u64,

    /// Gas price in wei.
    #[serde(
        default = "default_gas_price",
        deserialize_with = "u256_lenient::deserialize"
    )]
    pub gas_price: U256,
}

fn default_gas_price() -> U256 {
    U256::from(DEFAULT_GAS_PRICE)
}

impl Default for ChainStats {
    fn default() -> Self {
        ChainStats {
            chain_id: None,
            current_block: 0,
            gas_price: default_gas_price(),
        }
    }
}

impl Display for ChainStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.chain_id {
            Some(chain_id) => writeln!(f, "chain id:      {chain_id}")?,
            None => writeln!(f, "chain id:      --")?,
        }
        writeln!(f, "current block: {}", self.current_block)?;
        write!(f, "gas price:     {} wei", self.gas_price)
    }
}

/// Current value of the governed protocol parameter (the interest rate, in percent).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentValue {
    #[serde(default, deserialize_with = "opt_f64_lenient::deserialize")]
    pub value: Option<f64>,
}

impl CurrentValue {
    /// Whether the backend has returned an actual value rather than an empty placeholder.
    pub fn is_valid(&self) -> bool {
        self.value.is_some_and(f64::is_finite)
    }
}

impl Display for CurrentValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) if value.is_finite() => write!(f, "{value}%"),
            _ => write!(f, "--%"),
        }
    }
}
