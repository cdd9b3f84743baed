// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use gfp_governance_types::{ProposalId, VoteWay};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    Vote(VoteWay),
    Queue,
    Execute,
}

/// Keeps track of the in-flight submission of every proposal row.
/// A row can have at most a single submission in flight, rows are independent of each other.
#[derive(Debug, Clone, Default)]
pub struct SubmissionTracker {
    in_flight: Arc<Mutex<HashMap<ProposalId, Submission>>>,
}

impl SubmissionTracker {
    fn lock(&self) -> MutexGuard<'_, HashMap<ProposalId, Submission>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the submission as in flight, unless the row already has one.
    /// The row is released once the returned guard is dropped.
    pub fn try_begin(&self, id: &ProposalId, submission: Submission) -> Option<SubmissionGuard> {
        let mut in_flight = self.lock();
        if in_flight.contains_key(id) {
            return None;
        }
        in_flight.insert(id.clone(), submission);

        Some(SubmissionGuard {
            tracker: self.clone(),
            id: id.clone(),
        })
    }

    pub fn status(&self, id: &ProposalId) -> Option<Submission> {
        self.lock().get(id).copied()
    }

    pub fn is_submitting(&self, id: &ProposalId) -> bool {
        self.lock().contains_key(id)
    }
}

#[derive(Debug)]
pub struct SubmissionGuard {
    tracker: SubmissionTracker,
    id: ProposalId,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.tracker.lock().remove(&self.id);
    }
}
