// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::utils::format_ether;
use alloy_primitives::U256;

const DISPLAYED_DECIMALS: usize = 4;
const ELLIPSIS: &str = "...";

/// Formats a token amount given in its smallest unit (18 decimals) for display,
/// keeping at most four decimal places.
pub fn format_token_value(value: U256) -> String {
    let formatted = format_ether(value);
    let Some((integer, fraction)) = formatted.split_once('.') else {
        return formatted;
    };

    let fraction: String = fraction.chars().take(DISPLAYED_DECIMALS).collect();
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncateAt {
    Middle,
    End,
}

/// Shortens the provided string to (at most) `max_chars` visible characters.
pub fn truncate_string(value: &str, max_chars: usize, at: TruncateAt) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }

    match at {
        TruncateAt::End => {
            let head: String = chars[..max_chars].iter().collect();
            format!("{head}{ELLIPSIS}")
        }
        TruncateAt::Middle => {
            let head_len = max_chars.div_ceil(2);
            let tail_len = max_chars - head_len;
            let head: String = chars[..head_len].iter().collect();
            let tail: String = chars[chars.len() - tail_len..].iter().collect();
            format!("{head}{ELLIPSIS}{tail}")
        }
    }
}
