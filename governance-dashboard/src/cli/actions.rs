// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::DashboardError;
use crate::intent::SubmittedIntent;
use crate::view::draft::ProposalDraft;
use crate::Dashboard;
use gfp_bin_common::output_format::OutputFormat;
use gfp_governance_types::{ProposalId, VoteWay};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::info;

#[derive(Debug, clap::Args)]
pub struct ProposalArgs {
    /// Identifier of the proposal.
    pub id: String,
}

impl ProposalArgs {
    fn proposal_id(&self) -> ProposalId {
        ProposalId::new(self.id.trim())
    }
}

#[derive(Debug, clap::Args)]
pub struct VoteArgs {
    #[command(flatten)]
    pub proposal: ProposalArgs,

    /// Direction of the vote: for, against or abstain.
    #[clap(long)]
    pub way: VoteWay,
}

#[derive(Debug, clap::Args)]
pub struct ProposeArgs {
    #[clap(long)]
    pub title: String,

    #[clap(long)]
    pub description: String,

    /// The proposed value of the governed parameter, in percent.
    #[clap(long, allow_negative_numbers = true)]
    pub new_value: i64,
}

#[derive(Serialize)]
struct SubmissionOutput {
    #[serde(flatten)]
    submitted: SubmittedIntent,
    explorer_url: Option<String>,
}

impl Display for SubmissionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.submitted)?;
        if let Some(url) = &self.explorer_url {
            write!(f, "\nview blockchain confirmation: {url}")?;
        }
        Ok(())
    }
}

// actions need both the signer and the up to date gas price
async fn prepare(dashboard: &Dashboard) -> Result<(), DashboardError> {
    let wallet = dashboard.connect_wallet().await?;
    info!("using account {}", wallet.address);
    dashboard.refresh_chain_stats().await?;
    Ok(())
}

fn print_submission(dashboard: &Dashboard, submitted: SubmittedIntent, output: OutputFormat) {
    let explorer_url = dashboard
        .network()
        .explorer_tx_url(&submitted.tx_hash.to_string());
    let submission = SubmissionOutput {
        submitted,
        explorer_url,
    };
    println!("{}", output.format(&submission));
}

pub(crate) async fn propose(
    dashboard: &Dashboard,
    args: ProposeArgs,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    let draft = ProposalDraft::new(args.title, args.description, args.new_value);
    // invalid drafts never reach the wallet or the backend
    draft.validate()?;

    prepare(dashboard).await?;
    let submitted = dashboard.board().submit_draft(&draft).await?;
    println!("{}", output.format(&submitted));
    Ok(())
}

pub(crate) async fn vote(
    dashboard: &Dashboard,
    args: VoteArgs,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    prepare(dashboard).await?;
    let submitted = dashboard
        .board()
        .vote(&args.proposal.proposal_id(), args.way)
        .await?;
    print_submission(dashboard, submitted, output);
    Ok(())
}

pub(crate) async fn queue(
    dashboard: &Dashboard,
    args: ProposalArgs,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    prepare(dashboard).await?;
    let submitted = dashboard.board().queue(&args.proposal_id()).await?;
    print_submission(dashboard, submitted, output);
    Ok(())
}

pub(crate) async fn execute(
    dashboard: &Dashboard,
    args: ProposalArgs,
    output: OutputFormat,
) -> Result<(), DashboardError> {
    prepare(dashboard).await?;
    let submitted = dashboard.board().execute(&args.proposal_id()).await?;
    print_submission(dashboard, submitted, output);
    Ok(())
}
