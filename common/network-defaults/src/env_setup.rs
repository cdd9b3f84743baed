// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::network::NetworkDefaultsError;
use std::path::Path;
use tracing::debug;

/// Loads the provided `.env` file into the process environment.
/// Variables that are already set are left untouched.
pub fn setup_env<P: AsRef<Path>>(config_env_file: Option<P>) -> Result<(), NetworkDefaultsError> {
    let Some(env_file) = config_env_file else {
        return Ok(());
    };
    let path = env_file.as_ref();

    dotenvy::from_path(path).map_err(|source| NetworkDefaultsError::EnvFileLoadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded environment from {}", path.display());
    Ok(())
}

/// Reads the value of the provided variable, treating empty values as unset.
pub fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
