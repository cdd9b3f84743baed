// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Client for the governance backend.
//!
//! The backend serves the read models (proposals, network statistics, current protocol value)
//! and builds unsigned transactions for every governance action, which are then handed
//! over to the wallet for signing.
//!
//! ```no_run
//! # use gfp_governance_client::{GovernanceApi, GovernanceApiClient, GovernanceApiError};
//! # async fn list() -> Result<(), GovernanceApiError> {
//!   let client = GovernanceApiClient::builder("http://localhost:8000")?.build()?;
//!   for proposal in client.get_proposals().await? {
//!       println!("{}", proposal.id());
//!   }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod routes;

pub use client::{ClientBuilder, GovernanceApi, GovernanceApiClient};
pub use error::GovernanceApiError;
