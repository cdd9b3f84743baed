// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub const NETWORK: &str = "GFP_NETWORK";
pub const BACKEND_URL: &str = "GFP_BACKEND_URL";
pub const WALLET_RPC: &str = "GFP_WALLET_RPC";
