// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cli::ConfigOverridableArgs;
use crate::config::Config;
use crate::error::DashboardError;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Overwrite existing configuration file.
    #[clap(long, short)]
    force: bool,
}

pub(crate) fn execute(
    args: Args,
    custom_config_path: Option<PathBuf>,
    config_override: ConfigOverridableArgs,
) -> Result<(), DashboardError> {
    let path = match custom_config_path {
        Some(path) => path,
        None => Config::default_location()?,
    };

    if path.exists() && !args.force {
        return Err(DashboardError::ExistingConfig { path });
    }

    let config = Config::new()?.with_override(config_override);
    config.ensure_is_valid()?;
    config.save_to_path(&path)?;

    println!("saved the configuration file to {}", path.display());
    Ok(())
}
