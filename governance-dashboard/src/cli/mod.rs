// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use crate::error::DashboardError;
use crate::intent::ConfirmationMode;
use crate::Dashboard;
use clap::{Parser, Subcommand};
use gfp_bin_common::logging::LoggingSettings;
use gfp_bin_common::output_format::OutputFormat;
use gfp_network_defaults::Network;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

pub mod actions;
pub mod init;
pub mod proposals;
pub mod stats;
pub mod watch;

#[derive(Debug, Parser)]
#[clap(author = "Nymtech", version, about)]
pub struct Cli {
    /// Path pointing to an env file that configures the dashboard.
    #[clap(short, long)]
    pub config_env_file: Option<PathBuf>,

    /// Flag used for disabling the printed banner in tty.
    #[clap(long)]
    pub no_banner: bool,

    /// Specifies custom location for the configuration file of the dashboard.
    #[clap(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[clap(short, long, default_value_t = OutputFormat::default(), global = true)]
    pub output: OutputFormat,

    #[command(flatten)]
    pub config_override: ConfigOverridableArgs,

    #[clap(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Logging settings from the config file, if there is one.
    pub fn logging_settings(&self) -> LoggingSettings {
        let path = match &self.config_path {
            Some(path) => Some(path.clone()),
            None => Config::default_location().ok(),
        };
        path.and_then(|path| Config::read_from_toml_file(path).ok())
            .map(|config| config.logging)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, clap::Args)]
pub struct ConfigOverridableArgs {
    /// The network the governor contract is deployed on.
    #[clap(long, global = true)]
    pub network: Option<Network>,

    /// Base url of the governance backend.
    #[clap(long, global = true)]
    pub backend_url: Option<Url>,

    /// JSON-RPC endpoint of the wallet used for signing transactions.
    #[clap(long, global = true)]
    pub wallet_rpc: Option<Url>,

    /// Whether submissions should wait for the transaction receipts.
    #[clap(long, value_enum, global = true)]
    pub confirmation: Option<ConfirmationMode>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the configuration file of the dashboard.
    Init(init::Args),

    /// Show the current network statistics.
    Stats,

    /// Show the current value of the governed protocol parameter.
    Value,

    /// Browse the governance proposals.
    #[clap(subcommand)]
    Proposals(proposals::Commands),

    /// Submit a new proposal.
    Propose(actions::ProposeArgs),

    /// Vote on an active proposal.
    Vote(actions::VoteArgs),

    /// Queue a succeeded proposal for execution.
    Queue(actions::ProposalArgs),

    /// Execute a queued proposal.
    Execute(actions::ProposalArgs),

    /// Keep refreshing and displaying the proposals until interrupted.
    Watch(watch::Args),
}

fn load_config(
    config_path: Option<PathBuf>,
    config_override: ConfigOverridableArgs,
) -> Result<Config, DashboardError> {
    let path = match config_path {
        Some(path) => Some(path),
        None => Config::default_location()
            .ok()
            .filter(|path| path.exists()),
    };

    let config = match path {
        Some(path) => Config::read_from_toml_file(path)?,
        None => {
            debug!("no config file found, using the defaults");
            Config::new()?
        }
    };

    let config = config.with_override(config_override);
    config.ensure_is_valid()?;
    Ok(config)
}

fn build_dashboard(
    config_path: Option<PathBuf>,
    config_override: ConfigOverridableArgs,
) -> Result<Dashboard, DashboardError> {
    Dashboard::new(load_config(config_path, config_override)?)
}

pub async fn execute(args: Cli) -> Result<(), DashboardError> {
    let Cli {
        config_path,
        output,
        config_override,
        command,
        ..
    } = args;

    match command {
        Commands::Init(init_args) => init::execute(init_args, config_path, config_override),
        Commands::Stats => {
            stats::execute_stats(&build_dashboard(config_path, config_override)?, output).await
        }
        Commands::Value => {
            stats::execute_value(&build_dashboard(config_path, config_override)?, output).await
        }
        Commands::Proposals(proposals_command) => {
            let dashboard = build_dashboard(config_path, config_override)?;
            proposals::execute(&dashboard, proposals_command, output).await
        }
        Commands::Propose(propose_args) => {
            let dashboard = build_dashboard(config_path, config_override)?;
            actions::propose(&dashboard, propose_args, output).await
        }
        Commands::Vote(vote_args) => {
            let dashboard = build_dashboard(config_path, config_override)?;
            actions::vote(&dashboard, vote_args, output).await
        }
        Commands::Queue(queue_args) => {
            let dashboard = build_dashboard(config_path, config_override)?;
            actions::queue(&dashboard, queue_args, output).await
        }
        Commands::Execute(execute_args) => {
            let dashboard = build_dashboard(config_path, config_override)?;
            actions::execute(&dashboard, execute_args, output).await
        }
        Commands::Watch(watch_args) => {
            let dashboard = build_dashboard(config_path, config_override)?;
            watch::execute(&dashboard, watch_args, output).await
        }
    }
}
