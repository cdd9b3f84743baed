// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Derivation of everything displayed about a proposal from its on-chain state.
//!
//! The proposal `state` is the only input used for deciding which actions are permitted.
//! Block deadlines and execution etas are only used for secondary facts, i.e. the remaining
//! voting time and whether a queued proposal can already be executed.

use gfp_governance_types::{ChainStats, Proposal, ProposalState};
use gfp_network_defaults::SECONDS_PER_BLOCK;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use time::OffsetDateTime;

pub mod humanize;

pub use humanize::{humanize_duration, relative_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Vote,
    Queue,
    Execute,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Vote => f.write_str("vote"),
            Action::Queue => f.write_str("queue"),
            Action::Execute => f.write_str("execute"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub visible: bool,
    pub enabled: bool,
}

impl ControlState {
    pub const HIDDEN: ControlState = ControlState {
        visible: false,
        enabled: false,
    };

    fn new(visible: bool, enabled: bool) -> Self {
        ControlState {
            visible,
            enabled: visible && enabled,
        }
    }

    fn disabled_if(self, condition: bool) -> Self {
        ControlState {
            visible: self.visible,
            enabled: self.enabled && !condition,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub vote: ControlState,
    pub queue: ControlState,
    pub execute: ControlState,
}

impl Controls {
    pub fn get(&self, action: Action) -> ControlState {
        match action {
            Action::Vote => self.vote,
            Action::Queue => self.queue,
            Action::Execute => self.execute,
        }
    }

    /// Controls as seen by a particular user: nothing can be submitted without a connected
    /// wallet or while another submission for the same proposal is still in flight.
    #[must_use]
    pub fn gated(self, wallet_connected: bool, submitting: bool) -> Self {
        let blocked = !wallet_connected || submitting;
        Controls {
            vote: self.vote.disabled_if(blocked),
            queue: self.queue.disabled_if(blocked),
            execute: self.execute.disabled_if(blocked),
        }
    }
}

/// Signed estimate of the time left until the voting deadline.
/// Negative once the deadline block has been produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingTime {
    pub seconds: i64,
}

impl RemainingTime {
    pub fn from_blocks(current_block: u64, deadline_block: u64) -> Self {
        let blocks = i128::from(deadline_block) - i128::from(current_block);
        let seconds = blocks.saturating_mul(i128::from(SECONDS_PER_BLOCK));
        RemainingTime {
            seconds: i64::try_from(seconds).unwrap_or(if seconds < 0 {
                i64::MIN
            } else {
                i64::MAX
            }),
        }
    }

    pub fn has_elapsed(&self) -> bool {
        self.seconds < 0
    }

    pub fn humanize(&self) -> String {
        humanize_duration(self.seconds.unsigned_abs())
    }
}

impl Display for RemainingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.humanize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalView {
    pub state: ProposalState,
    pub voting_period_pending: bool,
    pub voting_period_active: bool,
    pub voting_period_expired: bool,
    pub pending_queue: bool,
    pub pending_execution: bool,
    pub execution_ready: bool,
    pub voting_period_remaining: Option<RemainingTime>,
    pub execution_eta_label: Option<String>,
    pub helper_message: Option<String>,
    pub controls: Controls,
    pub available_actions: BTreeSet<Action>,
}

impl ProposalView {
    pub fn allows(&self, action: Action) -> bool {
        self.available_actions.contains(&action)
    }
}

/// Classifies the proposal at the provided point in time.
pub fn classify(
    proposal: &Proposal,
    chain_stats: &ChainStats,
    now: OffsetDateTime,
) -> ProposalView {
    let state = proposal.state;
    let now = now.unix_timestamp();

    let voting_period_pending = state == ProposalState::Pending;
    let voting_period_active = state == ProposalState::Active;
    let voting_period_expired = !voting_period_pending && !voting_period_active;
    let pending_queue = state == ProposalState::Succeeded;
    let pending_execution = state == ProposalState::Queued;

    // without a known eta we can't claim the timelock has passed
    let execution_ready =
        pending_execution && proposal.execution_eta.is_some_and(|eta| now >= eta);

    let voting_period_remaining = proposal
        .block_deadline
        .map(|deadline| RemainingTime::from_blocks(chain_stats.current_block, deadline));
    let execution_eta_label = proposal.execution_eta.map(|eta| relative_to(now, eta));

    let helper_message = if state == ProposalState::Executed {
        Some("Proposal was successfully executed".to_string())
    } else if pending_execution {
        let eta = match (&execution_eta_label, execution_ready) {
            (Some(label), false) => format!(" {label}"),
            _ => String::new(),
        };
        Some(format!("Proposal queued. Ready to execute{eta}."))
    } else if pending_queue {
        Some("Proposal Succeeded and ready to be queued".to_string())
    } else if voting_period_active {
        // the reported state may lag behind the chain
        match voting_period_remaining {
            Some(remaining) if remaining.has_elapsed() => Some(format!(
                "Voting period ended {} ago. Awaiting state update",
                remaining.humanize()
            )),
            Some(remaining) => Some(format!(
                "Voting period started. {} remaining",
                remaining.humanize()
            )),
            None => Some("Voting period started. -- remaining".to_string()),
        }
    } else if voting_period_expired {
        Some("Voting period has expired".to_string())
    } else if voting_period_pending {
        Some("Voting period has not started yet".to_string())
    } else {
        None
    };

    let controls = Controls {
        vote: ControlState::new(!voting_period_expired, voting_period_active),
        queue: ControlState::new(pending_queue, true),
        execute: ControlState::new(pending_execution, execution_ready),
    };

    let available_actions = [Action::Vote, Action::Queue, Action::Execute]
        .into_iter()
        .filter(|action| controls.get(*action).enabled)
        .collect();

    ProposalView {
        state,
        voting_period_pending,
        voting_period_active,
        voting_period_expired,
        pending_queue,
        pending_execution,
        execution_ready,
        voting_period_remaining,
        execution_eta_label,
        helper_message,
        controls,
        available_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfp_governance_types::ProposalVotes;

    const NOW: i64 = 1_700_000_000;

    fn proposal(state: ProposalState) -> Proposal {
        Proposal {
            id: "1".into(),
            title: "Raise the rate".to_string(),
            description: "to 5%".to_string(),
            state,
            block_deadline: Some(1_000),
            execution_eta: None,
            votes: ProposalVotes::default(),
        }
    }

    fn stats(current_block: u64) -> ChainStats {
        ChainStats {
            current_block,
            ..Default::default()
        }
    }

    fn at(timestamp: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(timestamp).unwrap()
    }

    fn classify_now(proposal: &Proposal) -> ProposalView {
        classify(proposal, &stats(900), at(NOW))
    }

    #[test]
    fn pending_proposals_show_a_disabled_vote_control() {
        let view = classify_now(&proposal(ProposalState::Pending));
        assert!(view.voting_period_pending);
        assert!(!view.voting_period_active);
        assert!(!view.voting_period_expired);
        assert_eq!(
            view.controls.vote,
            ControlState {
                visible: true,
                enabled: false
            }
        );
        assert!(view.available_actions.is_empty());
        assert_eq!(
            view.helper_message.as_deref(),
            Some("Voting period has not started yet")
        );
    }

    #[test]
    fn active_proposals_can_be_voted_on() {
        let view = classify_now(&proposal(ProposalState::Active));
        assert!(view.voting_period_active);
        assert!(!view.voting_period_expired);
        assert!(view.allows(Action::Vote));
        assert_eq!(view.available_actions.len(), 1);

        // 100 blocks * 15s
        assert_eq!(
            view.voting_period_remaining,
            Some(RemainingTime { seconds: 1500 })
        );
        assert_eq!(
            view.helper_message.as_deref(),
            Some("Voting period started. 25 minutes remaining")
        );
    }

    #[test]
    fn terminal_states_expire_the_voting_period() {
        for state in ProposalState::ALL.into_iter().filter(ProposalState::is_terminal) {
            let view = classify_now(&proposal(state));
            assert!(view.voting_period_expired, "{state}");
            assert!(!view.allows(Action::Vote), "{state}");
            assert!(!view.controls.vote.visible, "{state}");
        }

        let executed = classify_now(&proposal(ProposalState::Executed));
        assert_eq!(
            executed.helper_message.as_deref(),
            Some("Proposal was successfully executed")
        );
        let defeated = classify_now(&proposal(ProposalState::Defeated));
        assert_eq!(
            defeated.helper_message.as_deref(),
            Some("Voting period has expired")
        );
    }

    #[test]
    fn succeeded_proposals_only_allow_queueing() {
        let view = classify_now(&proposal(ProposalState::Succeeded));
        assert!(view.pending_queue);
        assert!(!view.pending_execution);
        assert!(!view.execution_ready);
        assert!(!view.voting_period_active);
        assert!(!view.voting_period_pending);
        assert_eq!(view.available_actions, BTreeSet::from([Action::Queue]));
        assert_eq!(
            view.helper_message.as_deref(),
            Some("Proposal Succeeded and ready to be queued")
        );
    }

    #[test]
    fn queued_proposals_become_executable_after_their_eta() {
        let mut queued = proposal(ProposalState::Queued);
        queued.execution_eta = Some(NOW + 2 * 3600);

        let before = classify(&queued, &stats(900), at(NOW));
        assert!(before.pending_execution);
        assert!(!before.execution_ready);
        assert!(before.controls.execute.visible);
        assert!(!before.controls.execute.enabled);
        assert_eq!(
            before.helper_message.as_deref(),
            Some("Proposal queued. Ready to execute in 2 hours.")
        );

        let mut became_ready = false;
        for offset in (0..4 * 3600).step_by(600) {
            let view = classify(&queued, &stats(900), at(NOW + offset));
            if became_ready {
                assert!(view.execution_ready, "readiness flipped back at +{offset}s");
            }
            became_ready |= view.execution_ready;
        }
        assert!(became_ready);

        let at_eta = classify(&queued, &stats(900), at(NOW + 2 * 3600));
        assert!(at_eta.execution_ready);
        assert_eq!(at_eta.available_actions, BTreeSet::from([Action::Execute]));
        assert_eq!(
            at_eta.helper_message.as_deref(),
            Some("Proposal queued. Ready to execute.")
        );
    }

    #[test]
    fn queued_proposal_without_eta_is_not_ready() {
        let view = classify_now(&proposal(ProposalState::Queued));
        assert!(!view.execution_ready);
        assert!(view.available_actions.is_empty());
        assert_eq!(
            view.helper_message.as_deref(),
            Some("Proposal queued. Ready to execute.")
        );
    }

    #[test]
    fn deadline_boundary() {
        let view = classify(&proposal(ProposalState::Active), &stats(1_000), at(NOW));
        let remaining = view.voting_period_remaining.unwrap();
        assert_eq!(remaining.seconds, 0);
        assert!(!remaining.has_elapsed());
        assert_eq!(remaining.humanize(), "a few seconds");

        assert_eq!(
            view.helper_message.as_deref(),
            Some("Voting period started. a few seconds remaining")
        );

        let late = classify(&proposal(ProposalState::Active), &stats(1_010), at(NOW));
        let remaining = late.voting_period_remaining.unwrap();
        assert!(remaining.has_elapsed());
        assert_eq!(remaining.humanize(), "3 minutes");
    }

    #[test]
    fn active_proposal_past_its_deadline_is_not_told_time_is_left() {
        let view = classify(&proposal(ProposalState::Active), &stats(1_200), at(NOW));
        assert_eq!(
            view.voting_period_remaining,
            Some(RemainingTime { seconds: -3000 })
        );
        assert_eq!(
            view.helper_message.as_deref(),
            Some("Voting period ended an hour ago. Awaiting state update")
        );
        // eligibility still follows the reported state
        assert!(view.allows(Action::Vote));
    }

    #[test]
    fn unknown_deadline_has_no_remaining_time() {
        let mut active = proposal(ProposalState::Active);
        active.block_deadline = None;
        let view = classify_now(&active);
        assert_eq!(view.voting_period_remaining, None);
        assert_eq!(
            view.helper_message.as_deref(),
            Some("Voting period started. -- remaining")
        );
    }

    #[test]
    fn classification_is_deterministic() {
        for state in ProposalState::ALL {
            let mut p = proposal(state);
            p.execution_eta = Some(NOW);
            let first = classify(&p, &stats(950), at(NOW));
            let second = classify(&p, &stats(950), at(NOW));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn gating_by_wallet_and_submission() {
        let view = classify_now(&proposal(ProposalState::Active));

        let disconnected = view.controls.gated(false, false);
        assert!(disconnected.vote.visible);
        assert!(!disconnected.vote.enabled);

        let submitting = view.controls.gated(true, true);
        assert!(!submitting.vote.enabled);

        let ready = view.controls.gated(true, false);
        assert!(ready.vote.enabled);
    }
}
