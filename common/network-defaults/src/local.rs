// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

// development chains: neither of them has a block explorer

pub const LOCALHOST_NETWORK_NAME: &str = "localhost";
pub const LOCALHOST_CHAIN_ID: u64 = 1337;

pub const HARDHAT_NETWORK_NAME: &str = "hardhat";
pub const HARDHAT_CHAIN_ID: u64 = 31_337;

pub const CURRENCY_SYMBOL: &str = "ETH";
