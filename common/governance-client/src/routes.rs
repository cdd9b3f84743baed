// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub const GOVERNANCE: &str = "governance";
pub const PROPOSALS: &str = "proposals";
pub const CURRENT_VALUE: &str = "current-value";
pub const BUILD_TX: &str = "build-tx";

pub const NETWORK: &str = "network";
pub const STATS: &str = "stats";

pub mod build_tx {
    pub const PROPOSAL: &str = "proposal";
    pub const VOTE: &str = "vote";
    pub const QUEUE: &str = "queue";
    pub const EXECUTE: &str = "execute";
}
