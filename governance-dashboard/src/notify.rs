// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::{error, info};

/// Transient, user facing, message about the progress of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notification {
    Loading(String),
    Success(String),
    Error(String),
}

impl Notification {
    pub fn loading(message: impl Into<String>) -> Self {
        Notification::Loading(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notification::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Loading(message)
            | Notification::Success(message)
            | Notification::Error(message) => message,
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Loading(message) => write!(f, "[...] {message}"),
            Notification::Success(message) => write!(f, "[ok] {message}"),
            Notification::Error(message) => write!(f, "[error] {message}"),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits all notifications as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Loading(message) => info!("{message}"),
            Notification::Success(message) => info!("{message}"),
            Notification::Error(message) => error!("{message}"),
        }
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingNotifier;
