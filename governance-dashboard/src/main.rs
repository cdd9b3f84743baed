// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use clap::{crate_name, crate_version, Parser};
use gfp_bin_common::logging::{maybe_print_banner, setup_tracing_logger};
use gfp_governance_dashboard::cli::{self, Cli};
use gfp_network_defaults::setup_env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    setup_env(args.config_env_file.as_ref())?;

    if !args.no_banner {
        maybe_print_banner(crate_name!(), crate_version!());
    }
    setup_tracing_logger(args.logging_settings());

    cli::execute(args).await?;
    Ok(())
}
