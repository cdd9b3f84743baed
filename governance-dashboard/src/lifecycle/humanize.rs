// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Approximate, human friendly, rendering of durations ("a few seconds", "3 hours", "a month").

const SECONDS_PER_MINUTE: f64 = 60.;
const SECONDS_PER_HOUR: f64 = 3_600.;
const SECONDS_PER_DAY: f64 = 86_400.;

// average gregorian calendar month and year, in days
const DAYS_PER_MONTH: f64 = 146_097. / 4_800.;
const DAYS_PER_YEAR: f64 = 146_097. / 400.;

/// Rounds the duration to its most significant unit.
pub fn humanize_duration(seconds: u64) -> String {
    let secs = seconds as f64;
    let minutes = (secs / SECONDS_PER_MINUTE).round();
    let hours = (secs / SECONDS_PER_HOUR).round();
    let days = (secs / SECONDS_PER_DAY).round();
    let months = (secs / SECONDS_PER_DAY / DAYS_PER_MONTH).round();
    let years = (secs / SECONDS_PER_DAY / DAYS_PER_YEAR).round();

    if secs < 45. {
        "a few seconds".to_string()
    } else if minutes <= 1. {
        "a minute".to_string()
    } else if minutes < 45. {
        format!("{minutes} minutes")
    } else if hours <= 1. {
        "an hour".to_string()
    } else if hours < 22. {
        format!("{hours} hours")
    } else if days <= 1. {
        "a day".to_string()
    } else if days < 26. {
        format!("{days} days")
    } else if months <= 1. {
        "a month".to_string()
    } else if months < 11. {
        format!("{months} months")
    } else if years <= 1. {
        "a year".to_string()
    } else {
        format!("{years} years")
    }
}

/// Humanized distance between `now` and `target`, e.g. "in 2 hours" or "5 minutes ago".
pub fn relative_to(now: i64, target: i64) -> String {
    let distance = humanize_duration(target.abs_diff(now));
    if target > now {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}
