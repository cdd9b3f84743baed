// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod cache;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod intent;
pub mod lifecycle;
pub mod notify;
pub mod view;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::Dashboard;
pub use error::DashboardError;
