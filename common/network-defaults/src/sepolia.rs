// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub const NETWORK_NAME: &str = "sepolia";
pub const CHAIN_ID: u64 = 11_155_111;
pub const CURRENCY_SYMBOL: &str = "SepoliaETH";
pub const BLOCK_EXPLORER: Option<&str> = Some("https://sepolia.etherscan.io");
