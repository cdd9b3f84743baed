// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::DashboardError;
use crate::Dashboard;
use gfp_bin_common::output_format::OutputFormat;
use gfp_governance_types::ChainStats;
use gfp_network_defaults::Network;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Serialize)]
struct AccountOutput {
    address: String,
    balance: String,
}

#[derive(Serialize)]
struct StatsOutput {
    network: Network,

    #[serde(flatten)]
    stats: ChainStats,

    account: Option<AccountOutput>,
}

impl Display for StatsOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "network:       {}", self.network)?;
        write!(f, "{}", self.stats)?;
        if let Some(account) = &self.account {
            write!(f, "\naccount:       {} ({})", account.address, account.balance)?;
        }
        Ok(())
    }
}

pub(crate) async fn execute_stats(
    dashboard: &Dashboard,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    let stats = dashboard.refresh_chain_stats().await?;

    let wallet = dashboard.wallet();
    let account = if wallet.has_provider() {
        wallet.connect().await;
        let session = wallet.session().await;
        session.display_address().map(|address| AccountOutput {
            address,
            balance: session.display_balance(dashboard.network().currency_symbol()),
        })
    } else {
        None
    };

    let output_data = StatsOutput {
        network: dashboard.network(),
        stats,
        account,
    };
    println!("{}", output.format(&output_data));
    Ok(())
}

pub(crate) async fn execute_value(
    dashboard: &Dashboard,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    let value = dashboard.current_value(true).await?;
    println!("{}", output.format(&value));
    Ok(())
}
