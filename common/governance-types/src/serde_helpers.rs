// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! The backend is not consistent about how it encodes numbers: depending on the field
//! (and the magnitude of the value) they arrive either as JSON numbers or as strings,
//! sometimes hex-encoded. Those helpers accept all of the variants.

use alloy_primitives::U256;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl NumberOrString {
    fn into_u256(self) -> Result<U256, String> {
        match self {
            NumberOrString::Unsigned(value) => Ok(U256::from(value)),
            NumberOrString::Signed(value) => u64::try_from(value)
                .map(U256::from)
                .map_err(|_| format!("{value} is negative")),
            NumberOrString::Float(value) => {
                if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                    Ok(U256::from(value as u128))
                } else {
                    Err(format!("{value} is not a non-negative integer"))
                }
            }
            NumberOrString::Text(raw) => {
                U256::from_str(raw.trim()).map_err(|err| format!("'{raw}': {err}"))
            }
        }
    }

    fn into_i64(self) -> Result<i64, String> {
        match self {
            NumberOrString::Unsigned(value) => {
                i64::try_from(value).map_err(|_| format!("{value} is out of range"))
            }
            NumberOrString::Signed(value) => Ok(value),
            NumberOrString::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    Ok(value as i64)
                } else {
                    Err(format!("{value} is not an integer"))
                }
            }
            NumberOrString::Text(raw) => {
                let trimmed = raw.trim();
                match trimmed.strip_prefix("0x") {
                    Some(hex) => i64::from_str_radix(hex, 16),
                    None => trimmed.parse(),
                }
                .map_err(|err| format!("'{raw}': {err}"))
            }
        }
    }
}

pub mod u256_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        NumberOrString::deserialize(deserializer)?
            .into_u256()
            .map_err(D::Error::custom)
    }
}

pub mod opt_u256_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<NumberOrString>::deserialize(deserializer)?
            .map(NumberOrString::into_u256)
            .transpose()
            .map_err(D::Error::custom)
    }
}

pub mod opt_u64_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = Option::<NumberOrString>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let value = value.into_i64().map_err(D::Error::custom)?;
        u64::try_from(value)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("{value} is negative")))
    }
}

pub mod u64_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = NumberOrString::deserialize(deserializer)?
            .into_i64()
            .map_err(D::Error::custom)?;
        u64::try_from(value).map_err(|_| D::Error::custom(format!("{value} is negative")))
    }
}

pub mod opt_i64_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<NumberOrString>::deserialize(deserializer)?
            .map(NumberOrString::into_i64)
            .transpose()
            .map_err(D::Error::custom)
    }
}

pub mod opt_f64_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Unsigned(value)) => Ok(Some(value as f64)),
            Some(NumberOrString::Signed(value)) => Ok(Some(value as f64)),
            Some(NumberOrString::Float(value)) => Ok(Some(value)),
            Some(NumberOrString::Text(raw)) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(|err| D::Error::custom(format!("'{raw}': {err}")))
            }
        }
    }
}

/// Identifiers are opaque to us, but some backends emit them as (potentially huge) numbers.
pub mod id_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Unsigned(value) => Ok(value.to_string()),
            NumberOrString::Signed(value) => Ok(value.to_string()),
            NumberOrString::Float(value) => Err(D::Error::custom(format!(
                "{value} can't be used as an identifier"
            ))),
            NumberOrString::Text(raw) => Ok(raw),
        }
    }
}
