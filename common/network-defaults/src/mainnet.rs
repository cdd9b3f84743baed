// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub const NETWORK_NAME: &str = "mainnet";
pub const CHAIN_ID: u64 = 1;
pub const CURRENCY_SYMBOL: &str = "ETH";
pub const BLOCK_EXPLORER: Option<&str> = Some("https://etherscan.io");
