// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::DashboardError;
use crate::view::ProposalRow;
use crate::Dashboard;
use clap::Subcommand;
use gfp_bin_common::output_format::OutputFormat;
use gfp_governance_types::ProposalId;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::warn;

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Retrieve the details of every proposal.
    #[clap(long)]
    expand_all: bool,
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    /// Identifier of the proposal.
    id: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all the proposals.
    List(ListArgs),

    /// Show the details of a single proposal.
    Show(ShowArgs),
}

#[derive(Serialize)]
#[serde(transparent)]
pub(crate) struct Rows(pub(crate) Vec<ProposalRow>);

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "there are no proposals");
        }
        for row in &self.0 {
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Brings the chain statistics and the wallet session up to date, so that the rows
/// reflect the remaining voting time and the actions available to the user.
pub(crate) async fn prepare_board(dashboard: &Dashboard) {
    if let Err(err) = dashboard.refresh_chain_stats().await {
        warn!("failed to retrieve the network statistics: {err}");
    }
    if dashboard.wallet().has_provider() {
        dashboard.wallet().connect().await;
    }
}

pub(crate) async fn rows(dashboard: &Dashboard, expand_all: bool) -> Result<Rows, DashboardError> {
    let board = dashboard.board();
    if expand_all {
        for proposal in board.proposals(false).await? {
            board.expand(proposal.id());
        }
    }
    Ok(Rows(board.rows(false).await?))
}

pub(crate) async fn execute(
    dashboard: &Dashboard,
    command: Commands,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    prepare_board(dashboard).await;

    match command {
        Commands::List(args) => {
            let rows = rows(dashboard, args.expand_all).await?;
            println!("{}", output.format(&rows));
        }
        Commands::Show(args) => {
            let id = ProposalId::new(args.id.trim());
            let row = dashboard.board().show(&id, false).await?;
            println!("{}", output.format(&row));
        }
    }
    Ok(())
}
