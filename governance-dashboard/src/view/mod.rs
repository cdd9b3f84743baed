// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cache::QueryCache;
use crate::config::CacheConfig;
use crate::error::DashboardError;
use crate::intent::{Intent, IntentBuilder, SubmittedIntent};
use crate::lifecycle::{classify, Action, ProposalView};
use crate::notify::{Notification, Notifier};
use crate::view::draft::ProposalDraft;
use crate::view::scope::ViewScope;
use crate::view::submission::{Submission, SubmissionTracker};
use crate::wallet::WalletContext;
use futures::future::join_all;
use gfp_governance_client::{GovernanceApi, GovernanceApiError};
use gfp_governance_types::format::{format_token_value, truncate_string, TruncateAt};
use gfp_governance_types::{
    Proposal, ProposalDetails, ProposalId, ProposalSummary, TxHash, VoteWay,
};
use gfp_network_defaults::Network;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use tracing::{error, warn};

pub mod draft;
pub mod scope;
pub mod submission;

const DISPLAYED_TITLE_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub r#for: String,
    pub against: String,
    pub abstain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDetails {
    pub votes: VoteTally,
    pub view: ProposalView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalRow {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub submission: Option<Submission>,

    /// Present only for expanded rows.
    pub details: Option<RowDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_error: Option<String>,
}

impl Display for ProposalRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.title)?;
        if let Some(details) = &self.details {
            write!(f, " [{}]", details.view.state)?;
        }
        writeln!(f)?;

        if let Some(submission) = &self.submission {
            writeln!(f, "\tsubmitting: {submission:?}")?;
        }
        if let Some(err) = &self.details_error {
            writeln!(f, "\tfailed to load the details: {err}")?;
        }
        let Some(details) = &self.details else {
            return Ok(());
        };

        if !self.description.is_empty() {
            writeln!(f, "\t{}", self.description)?;
        }
        if let Some(message) = &details.view.helper_message {
            writeln!(f, "\t{message}")?;
        }
        writeln!(
            f,
            "\tvotes: for {} | against {} | abstain {}",
            details.votes.r#for, details.votes.against, details.votes.abstain
        )?;

        let controls = &details.view.controls;
        let actions = [Action::Vote, Action::Queue, Action::Execute]
            .into_iter()
            .filter_map(|action| {
                let control = controls.get(action);
                match (control.visible, control.enabled) {
                    (false, _) => None,
                    (true, true) => Some(action.to_string()),
                    (true, false) => Some(format!("{action} (disabled)")),
                }
            })
            .collect::<Vec<_>>();
        if !actions.is_empty() {
            writeln!(f, "\tactions: {}", actions.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedProposal {
    pub tx_hash: TxHash,
    pub explorer_url: Option<String>,
}

impl Display for SubmittedProposal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "proposal submitted in transaction {}", self.tx_hash)?;
        if let Some(url) = &self.explorer_url {
            write!(f, "\nview blockchain confirmation: {url}")?;
        }
        Ok(())
    }
}

struct ActionMessages {
    loading: String,
    success: String,
    error: &'static str,
}

impl ActionMessages {
    fn new(action: Action, title: &str) -> Self {
        let title = truncate_string(title, DISPLAYED_TITLE_LENGTH, TruncateAt::End);
        match action {
            Action::Vote => ActionMessages {
                loading: format!("Submitting votes to Proposal: {title}"),
                success: format!("Successfully voted on Proposal ID: {title}"),
                error: "Error while trying to submit votes. Try again later",
            },
            Action::Queue => ActionMessages {
                loading: format!("Queueing Proposal: {title}. Awaiting transaction."),
                success: format!("Successfully queued Proposal: {title}"),
                error: "Error while trying to queue proposal. Try again later",
            },
            Action::Execute => ActionMessages {
                loading: format!("Executing Proposal: {title}. Awaiting transaction."),
                success: format!("Successfully executed Proposal: {title}"),
                error: "Error while trying to execute proposal. Try again later",
            },
        }
    }
}

/// The proposal list together with the details of the expanded rows.
///
/// Every request made by the board is bound to its scope: once the board is dropped
/// (or explicitly closed), whatever is still in flight is abandoned.
pub struct ProposalBoard {
    api: Arc<dyn GovernanceApi>,
    intents: IntentBuilder,
    wallet: WalletContext,
    notifier: Arc<dyn Notifier>,
    network: Network,

    list: QueryCache<(), Vec<ProposalSummary>, GovernanceApiError>,
    details: QueryCache<ProposalId, ProposalDetails, GovernanceApiError>,
    expanded: Mutex<BTreeSet<ProposalId>>,
    submissions: SubmissionTracker,
    scope: ViewScope,
}

impl ProposalBoard {
    pub fn new(
        api: Arc<dyn GovernanceApi>,
        intents: IntentBuilder,
        wallet: WalletContext,
        notifier: Arc<dyn Notifier>,
        network: Network,
        config: &CacheConfig,
    ) -> Self {
        ProposalBoard {
            api,
            intents,
            wallet,
            notifier,
            network,
            list: QueryCache::new(config.proposal_list_ttl),
            details: QueryCache::new(config.proposal_details_ttl),
            expanded: Mutex::new(BTreeSet::new()),
            submissions: SubmissionTracker::default(),
            scope: ViewScope::new(),
        }
    }

    pub fn submissions(&self) -> &SubmissionTracker {
        &self.submissions
    }

    pub fn close(&self) {
        self.scope.close()
    }

    fn expanded_rows(&self) -> MutexGuard<'_, BTreeSet<ProposalId>> {
        self.expanded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn expand(&self, id: &ProposalId) {
        self.expanded_rows().insert(id.clone());
    }

    pub fn collapse(&self, id: &ProposalId) {
        self.expanded_rows().remove(id);
    }

    pub fn is_expanded(&self, id: &ProposalId) -> bool {
        self.expanded_rows().contains(id)
    }

    pub async fn proposals(&self, force: bool) -> Result<Vec<ProposalSummary>, DashboardError> {
        let api = Arc::clone(&self.api);
        let fetch = self
            .list
            .fetch((), force, move || async move { api.get_proposals().await });
        Ok(self.scope.run(fetch).await??)
    }

    pub async fn details(
        &self,
        id: &ProposalId,
        force: bool,
    ) -> Result<ProposalDetails, DashboardError> {
        let api = Arc::clone(&self.api);
        let proposal_id = id.clone();
        let fetch = self.details.fetch(id.clone(), force, move || async move {
            api.get_proposal(&proposal_id).await
        });
        Ok(self.scope.run(fetch).await??)
    }

    pub async fn proposal(&self, id: &ProposalId, force: bool) -> Result<Proposal, DashboardError> {
        let summaries = self.proposals(false).await?;
        let summary = summaries
            .iter()
            .find(|summary| summary.id() == id)
            .ok_or_else(|| DashboardError::ProposalNotFound { id: id.clone() })?;
        let details = self.details(id, force).await?;
        Ok(Proposal::new(summary, &details))
    }

    async fn classify(&self, proposal: &Proposal) -> ProposalView {
        let chain_stats = self.wallet.chain_stats().await;
        let mut view = classify(proposal, &chain_stats, OffsetDateTime::now_utc());
        view.controls = view.controls.gated(
            self.wallet.connected().await.is_some(),
            self.submissions.is_submitting(&proposal.id),
        );
        view
    }

    async fn row(&self, summary: &ProposalSummary, force: bool) -> ProposalRow {
        let id = summary.id();
        let (title, description) = summary.content.title_and_description();
        let mut row = ProposalRow {
            id: id.clone(),
            title,
            description,
            submission: self.submissions.status(id),
            details: None,
            details_error: None,
        };

        if !self.is_expanded(id) {
            return row;
        }

        match self.details(id, force).await {
            Ok(details) => {
                let proposal = Proposal::new(summary, &details);
                row.details = Some(RowDetails {
                    votes: VoteTally {
                        r#for: format_token_value(proposal.votes.for_votes),
                        against: format_token_value(proposal.votes.against_votes),
                        abstain: format_token_value(proposal.votes.abstain_votes),
                    },
                    view: self.classify(&proposal).await,
                });
            }
            Err(err) => {
                warn!("failed to retrieve details of proposal {id}: {err}");
                row.details_error = Some(err.to_string());
            }
        }
        row
    }

    /// Renders every proposal. Details are only retrieved for the expanded rows.
    pub async fn rows(&self, force: bool) -> Result<Vec<ProposalRow>, DashboardError> {
        let summaries = self.proposals(force).await?;
        Ok(join_all(summaries.iter().map(|summary| self.row(summary, force))).await)
    }

    /// Renders a single, expanded, proposal.
    pub async fn show(&self, id: &ProposalId, force: bool) -> Result<ProposalRow, DashboardError> {
        let summaries = self.proposals(false).await?;
        let summary = summaries
            .iter()
            .find(|summary| summary.id() == id)
            .ok_or_else(|| DashboardError::ProposalNotFound { id: id.clone() })?;
        self.expand(id);
        Ok(self.row(summary, force).await)
    }

    pub async fn vote(
        &self,
        id: &ProposalId,
        way: VoteWay,
    ) -> Result<SubmittedIntent, DashboardError> {
        self.submit_action(
            id,
            Action::Vote,
            Submission::Vote(way),
            Intent::vote(id.clone(), way),
        )
        .await
    }

    pub async fn queue(&self, id: &ProposalId) -> Result<SubmittedIntent, DashboardError> {
        self.submit_action(id, Action::Queue, Submission::Queue, Intent::queue(id.clone()))
            .await
    }

    pub async fn execute(&self, id: &ProposalId) -> Result<SubmittedIntent, DashboardError> {
        self.submit_action(
            id,
            Action::Execute,
            Submission::Execute,
            Intent::execute(id.clone()),
        )
        .await
    }

    async fn submit_action(
        &self,
        id: &ProposalId,
        action: Action,
        submission: Submission,
        intent: Intent,
    ) -> Result<SubmittedIntent, DashboardError> {
        let Some(_guard) = self.submissions.try_begin(id, submission) else {
            return Err(DashboardError::SubmissionInProgress { id: id.clone() });
        };
        if self.wallet.connected().await.is_none() {
            return Err(DashboardError::WalletNotConnected);
        }

        let proposal = self.proposal(id, false).await?;
        let view = classify(
            &proposal,
            &self.wallet.chain_stats().await,
            OffsetDateTime::now_utc(),
        );
        if !view.allows(action) {
            return Err(DashboardError::ActionUnavailable {
                id: id.clone(),
                action,
                state: proposal.state,
            });
        }

        let messages = ActionMessages::new(action, &proposal.title);
        self.notifier.notify(Notification::loading(messages.loading));

        match self.scope.run(self.intents.build_and_submit(intent)).await? {
            Ok(submitted) => {
                self.notifier.notify(Notification::success(messages.success));
                if let Err(err) = self.details(id, true).await {
                    warn!("failed to refresh proposal {id} after the submission: {err}");
                }
                self.refresh_balance().await;
                Ok(submitted)
            }
            Err(err) => {
                error!("failed to {action} proposal {id}: {err}");
                self.notifier.notify(Notification::error(messages.error));
                Err(err.into())
            }
        }
    }

    // the submission has spent gas
    async fn refresh_balance(&self) {
        if let Err(err) = self.wallet.refresh_balance().await {
            warn!("failed to refresh the wallet balance: {err}");
        }
    }

    pub async fn submit_draft(
        &self,
        draft: &ProposalDraft,
    ) -> Result<SubmittedProposal, DashboardError> {
        let request = draft.validate()?;
        if self.wallet.connected().await.is_none() {
            return Err(DashboardError::WalletNotConnected);
        }

        let intent = Intent::CreateProposal(request);
        match self.scope.run(self.intents.build_and_submit(intent)).await? {
            Ok(submitted) => {
                self.list.invalidate(&());
                self.refresh_balance().await;
                let tx_hash = submitted.tx_hash;
                Ok(SubmittedProposal {
                    tx_hash,
                    explorer_url: self.network.explorer_tx_url(&tx_hash.to_string()),
                })
            }
            Err(err) => {
                error!("failed to submit the proposal: {err}");
                self.notifier.notify(Notification::error("Submit error"));
                Err(err.into())
            }
        }
    }
}

impl Drop for ProposalBoard {
    fn drop(&mut self) {
        self.scope.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::ConfirmationMode;
    use crate::notify::RecordingNotifier;
    use crate::testing::{MockGovernanceApi, MockWallet};
    use crate::wallet::{WalletProvider, WalletUpdate};
    use gfp_governance_types::{ProposalState, U256};
    use serde_json::json;
    use std::time::Duration;

    const LONG_TITLE: &str = "A very long proposal title that goes on";

    fn summary(id: &str, title: &str) -> serde_json::Value {
        json!({
            "content": {
                "proposalId": id,
                "title": title,
                "description": "Change the protocol rate"
            }
        })
    }

    fn details(state: ProposalState, eta: i64) -> serde_json::Value {
        json!({
            "state": state as u8,
            "blockDeadline": 1100,
            "executionEta": eta,
            "proposalVotes": {
                "forVotes": "1500000000000000000",
                "againstVotes": 0
            }
        })
    }

    fn api() -> MockGovernanceApi {
        MockGovernanceApi::default()
            .with_proposal(summary("1", LONG_TITLE), details(ProposalState::Active, 0))
            .with_proposal(
                summary("2", "Lower the rate"),
                details(ProposalState::Succeeded, 0),
            )
    }

    struct Harness {
        board: ProposalBoard,
        api: Arc<MockGovernanceApi>,
        notifier: RecordingNotifier,
    }

    async fn harness(api: MockGovernanceApi, wallet: Option<MockWallet>) -> Harness {
        let api = Arc::new(api);
        let notifier = RecordingNotifier::default();
        let connect = wallet.is_some();
        let ctx = WalletContext::new(
            wallet.map(|wallet| Arc::new(wallet) as Arc<dyn WalletProvider>),
            Arc::new(notifier.clone()),
        );
        if connect {
            ctx.connect().await;
        }
        let stats = api.stats.lock().unwrap().clone();
        ctx.chain_stats_cache().update(stats).await;

        let intents =
            IntentBuilder::new(api.clone(), ctx.clone(), ConfirmationMode::AwaitReceipt);
        let board = ProposalBoard::new(
            api.clone(),
            intents,
            ctx,
            Arc::new(notifier.clone()),
            Network::Sepolia,
            &CacheConfig::default(),
        );

        Harness {
            board,
            api,
            notifier,
        }
    }

    #[tokio::test]
    async fn details_are_only_fetched_for_expanded_rows() {
        let h = harness(api(), Some(MockWallet::default())).await;

        let rows = h.board.rows(false).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.details.is_none()));
        assert_eq!(h.api.count("proposal:"), 0);

        h.board.expand(&"1".into());
        let rows = h.board.rows(false).await.unwrap();
        let details = rows[0].details.as_ref().unwrap();
        assert_eq!(details.view.state, ProposalState::Active);
        assert_eq!(details.votes.r#for, "1.5");
        assert_eq!(
            details.view.helper_message.as_deref(),
            Some("Voting period started. 25 minutes remaining")
        );
        assert!(rows[1].details.is_none());

        // both the list and the details are still fresh
        h.board.rows(false).await.unwrap();
        assert_eq!(h.api.count("proposals"), 1);
        assert_eq!(h.api.count("proposal:1"), 1);

        h.board.rows(true).await.unwrap();
        assert_eq!(h.api.count("proposals"), 2);
        assert_eq!(h.api.count("proposal:1"), 2);

        h.board.collapse(&"1".into());
        assert!(!h.board.is_expanded(&"1".into()));
    }

    #[tokio::test]
    async fn controls_require_connected_wallet() {
        let h = harness(api(), None).await;
        let row = h.board.show(&"1".into(), false).await.unwrap();
        let vote = row.details.unwrap().view.controls.vote;
        assert!(vote.visible);
        assert!(!vote.enabled);

        let h = harness(api(), Some(MockWallet::default())).await;
        let row = h.board.show(&"1".into(), false).await.unwrap();
        assert!(row.details.unwrap().view.controls.vote.enabled);
    }

    #[tokio::test]
    async fn unknown_proposal() {
        let h = harness(api(), None).await;
        assert!(matches!(
            h.board.show(&"42".into(), false).await,
            Err(DashboardError::ProposalNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn successful_vote_notifies_and_refetches() {
        let h = harness(api(), Some(MockWallet::default())).await;
        let id: ProposalId = "1".into();
        h.board.details(&id, false).await.unwrap();
        h.board
            .wallet
            .update(WalletUpdate {
                balance: Some(U256::from(7)),
                ..Default::default()
            })
            .await;

        let submitted = h.board.vote(&id, VoteWay::For).await.unwrap();
        assert!(submitted.receipt.is_some());
        // balance is re-read once the transaction went through
        assert_eq!(
            h.board.wallet.session().await.balance,
            U256::from(1_500_000_000_000_000_000u64)
        );

        assert_eq!(
            h.notifier.received(),
            vec![
                Notification::loading("Submitting votes to Proposal: A very long proposal title tha..."),
                Notification::success(
                    "Successfully voted on Proposal ID: A very long proposal title tha..."
                ),
            ]
        );
        assert_eq!(h.api.count("build-tx/vote:1:1"), 1);
        // forced refetch after the submission
        assert_eq!(h.api.count("proposal:1"), 2);
        assert!(!h.board.submissions().is_submitting(&id));
    }

    #[tokio::test]
    async fn failed_vote_is_surfaced() {
        let h = harness(
            MockGovernanceApi {
                fail_build: true,
                ..api()
            },
            Some(MockWallet::default()),
        )
        .await;
        let id: ProposalId = "1".into();

        let err = h.board.vote(&id, VoteWay::Against).await.unwrap_err();
        assert!(matches!(err, DashboardError::SubmissionFailure { .. }));
        assert_eq!(
            h.notifier.received().last(),
            Some(&Notification::error(
                "Error while trying to submit votes. Try again later"
            ))
        );
        assert!(!h.board.submissions().is_submitting(&id));
    }

    #[tokio::test]
    async fn actions_follow_proposal_state() {
        let h = harness(api(), Some(MockWallet::default())).await;

        let err = h.board.queue(&"1".into()).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ActionUnavailable {
                action: Action::Queue,
                state: ProposalState::Active,
                ..
            }
        ));
        assert!(h.board.vote(&"2".into(), VoteWay::For).await.is_err());
        assert_eq!(h.api.count("build-tx"), 0);
        assert!(h.notifier.received().is_empty());

        h.board.queue(&"2".into()).await.unwrap();
        assert_eq!(
            h.notifier.received(),
            vec![
                Notification::loading("Queueing Proposal: Lower the rate. Awaiting transaction."),
                Notification::success("Successfully queued Proposal: Lower the rate"),
            ]
        );
    }

    #[tokio::test]
    async fn execution_waits_for_the_eta() {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let api = MockGovernanceApi::default()
            .with_proposal(
                summary("1", "Timelocked"),
                details(ProposalState::Queued, now + 3600),
            )
            .with_proposal(
                summary("2", "Ready"),
                details(ProposalState::Queued, now - 60),
            );
        let h = harness(api, Some(MockWallet::default())).await;

        assert!(matches!(
            h.board.execute(&"1".into()).await,
            Err(DashboardError::ActionUnavailable { .. })
        ));
        h.board.execute(&"2".into()).await.unwrap();
        assert_eq!(h.api.count("build-tx/execute:2"), 1);
    }

    #[tokio::test]
    async fn actions_require_connected_wallet() {
        let h = harness(api(), None).await;
        assert!(matches!(
            h.board.vote(&"1".into(), VoteWay::For).await,
            Err(DashboardError::WalletNotConnected)
        ));
        assert_eq!(h.api.count("build-tx"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn second_click_during_submission_is_ignored() {
        let h = harness(
            MockGovernanceApi {
                build_delay: Duration::from_secs(1),
                ..api()
            },
            Some(MockWallet::default()),
        )
        .await;
        let id: ProposalId = "1".into();

        let (first, second) = tokio::join!(h.board.vote(&id, VoteWay::For), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.board.vote(&id, VoteWay::Against).await
        });

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(DashboardError::SubmissionInProgress { .. })
        ));
        assert_eq!(h.api.count("build-tx/vote"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn submissions_of_different_proposals_are_independent() {
        let h = harness(
            MockGovernanceApi {
                build_delay: Duration::from_secs(1),
                ..api()
            },
            Some(MockWallet::default()),
        )
        .await;
        let first: ProposalId = "1".into();
        let second: ProposalId = "2".into();

        let (vote, queue, during) = tokio::join!(
            h.board.vote(&first, VoteWay::Abstain),
            h.board.queue(&second),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                (
                    h.board.submissions().status(&first),
                    h.board.submissions().status(&second),
                )
            }
        );

        assert!(vote.is_ok());
        assert!(queue.is_ok());
        assert_eq!(
            during,
            (
                Some(Submission::Vote(VoteWay::Abstain)),
                Some(Submission::Queue)
            )
        );
        assert_eq!(h.board.submissions().status(&first), None);
        assert_eq!(h.board.submissions().status(&second), None);
    }

    #[tokio::test]
    async fn closed_board_discards_results() {
        let h = harness(api(), None).await;
        h.board.close();
        assert!(matches!(
            h.board.rows(false).await,
            Err(DashboardError::Cancelled(_))
        ));
    }

    #[tokio::test]
    async fn submitting_drafts() {
        let h = harness(api(), None).await;
        let draft = ProposalDraft::new("Raise rate", "Raise the rate to 5%", 5);
        assert!(matches!(
            h.board.submit_draft(&draft).await,
            Err(DashboardError::WalletNotConnected)
        ));

        let h = harness(api(), Some(MockWallet::default())).await;
        let invalid = ProposalDraft::new("Short", "Raise the rate to 5%", 5);
        assert!(matches!(
            h.board.submit_draft(&invalid).await,
            Err(DashboardError::InvalidDraft { .. })
        ));
        assert_eq!(h.api.count("build-tx"), 0);

        let submitted = h.board.submit_draft(&draft).await.unwrap();
        assert_eq!(submitted.tx_hash, TxHash::repeat_byte(1));
        assert_eq!(
            submitted.explorer_url,
            Some(format!(
                "https://sepolia.etherscan.io/tx/{}",
                TxHash::repeat_byte(1)
            ))
        );

        let h = harness(
            MockGovernanceApi {
                fail_build: true,
                ..api()
            },
            Some(MockWallet::default()),
        )
        .await;
        assert!(h.board.submit_draft(&draft).await.is_err());
        assert_eq!(
            h.notifier.received(),
            vec![Notification::error("Submit error")]
        );
    }
}
