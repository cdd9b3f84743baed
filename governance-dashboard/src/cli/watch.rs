// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cli::proposals::{prepare_board, rows, Rows};
use crate::error::DashboardError;
use crate::Dashboard;
use gfp_bin_common::output_format::OutputFormat;
use gfp_governance_types::{ChainStats, CurrentValue};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// How often the proposals are re-rendered.
    #[clap(long, value_parser = humantime::parse_duration, default_value = "30s")]
    interval: Duration,

    /// Retrieve the details of every proposal.
    #[clap(long)]
    expand_all: bool,
}

#[derive(Serialize)]
struct Snapshot {
    current_value: CurrentValue,
    chain_stats: ChainStats,
    proposals: Rows,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "current value: {}", self.current_value)?;
        writeln!(f, "{}", self.chain_stats)?;
        writeln!(f)?;
        write!(f, "{}", self.proposals)
    }
}

async fn render(dashboard: &Dashboard, expand_all: bool) -> Result<Snapshot, DashboardError> {
    Ok(Snapshot {
        current_value: dashboard.current_value(false).await?,
        chain_stats: dashboard.wallet().chain_stats().await,
        proposals: rows(dashboard, expand_all).await?,
    })
}

pub(crate) async fn execute(
    dashboard: &Dashboard,
    args: Args,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    if args.interval.is_zero() {
        return Err(DashboardError::InvalidConfig {
            reason: "the watch interval must be non-zero".to_string(),
        });
    }
    prepare_board(dashboard).await;

    let shutdown = CancellationToken::new();
    let refreshers = dashboard.start_refreshers(shutdown.clone());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut ticker = tokio::time::interval(args.interval);
    loop {
        tokio::select! {
            biased;
            _ = &mut ctrl_c => {
                info!("received SIGINT");
                break;
            }
            _ = ticker.tick() => {
                match render(dashboard, args.expand_all).await {
                    Ok(snapshot) => println!("{}", output.format(&snapshot)),
                    Err(err) => warn!("failed to render the proposals: {err}"),
                }
            }
        }
    }

    dashboard.board().close();
    shutdown.cancel();
    for refresher in refreshers {
        if let Err(err) = refresher.await {
            warn!("refresher task has panicked: {err}");
        }
    }
    Ok(())
}
