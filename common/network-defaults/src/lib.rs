// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod local;
pub mod mainnet;
pub mod network;
pub mod sepolia;

#[cfg(feature = "env")]
pub mod env_setup;
#[cfg(feature = "env")]
pub mod var_names;

#[cfg(feature = "env")]
pub use env_setup::*;
pub use network::*;

/// Average block time assumed when translating block heights into wall-clock durations.
pub const SECONDS_PER_BLOCK: u64 = 15;
