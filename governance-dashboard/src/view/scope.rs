// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the view has been closed before the operation completed")]
pub struct Cancelled;

/// Lifetime of a consuming view. Work started through the scope is abandoned
/// once the scope is closed, and its results are never observed.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        ViewScope::default()
    }

    pub fn close(&self) {
        self.token.cancel()
    }

    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Cancelled),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn completes_while_open() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 42 }).await, Ok(42));
    }

    #[tokio::test]
    async fn closed_scope_discards_results() {
        let scope = ViewScope::new();
        scope.close();
        assert_eq!(scope.run(async { 42 }).await, Err(Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_abandons_in_flight_work() {
        let scope = ViewScope::new();
        let closer = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            closer.close();
        });

        let res = scope
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                42
            })
            .await;
        assert_eq!(res, Err(Cancelled));
    }
}
