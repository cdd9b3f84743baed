// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::GovernanceApiError;
use crate::routes;
use async_trait::async_trait;
use gfp_governance_types::{
    BuildTxResponse, ChainStats, CurrentValue, NewProposalRequest, ProposalActionRequest,
    ProposalDetails, ProposalId, ProposalSummary, VoteRequest,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, trace};
use url::Url;

/// Everything the dashboard needs from the governance backend.
#[async_trait]
pub trait GovernanceApi: Send + Sync {
    async fn get_proposals(&self) -> Result<Vec<ProposalSummary>, GovernanceApiError>;

    async fn get_proposal(&self, id: &ProposalId) -> Result<ProposalDetails, GovernanceApiError>;

    async fn get_current_value(&self) -> Result<CurrentValue, GovernanceApiError>;

    async fn get_network_stats(&self) -> Result<ChainStats, GovernanceApiError>;

    async fn build_proposal_tx(
        &self,
        request: &NewProposalRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError>;

    async fn build_vote_tx(&self, request: &VoteRequest)
        -> Result<BuildTxResponse, GovernanceApiError>;

    async fn build_queue_tx(
        &self,
        request: &ProposalActionRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError>;

    async fn build_execute_tx(
        &self,
        request: &ProposalActionRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError>;
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone)]
pub struct GovernanceApiClient {
    base_url: Url,
    inner_client: reqwest::Client,
}

impl GovernanceApiClient {
    pub fn builder(base_url: impl Into<String>) -> Result<ClientBuilder, GovernanceApiError> {
        ClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GovernanceApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GovernanceApiError::UnsupportedServerUrl {
                raw: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<Response, GovernanceApiError> {
        trace!("sending request to {url}");
        request
            .send()
            .await
            .map_err(|source| GovernanceApiError::RequestSendingFailure {
                url: url.to_string(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, GovernanceApiError> {
        let url = self.endpoint(segments)?;
        let request = self.inner_client.request(Method::GET, url.clone());
        let response = self.send(&url, request).await?;
        parse_response(url, response).await
    }

    async fn build_tx<B: Serialize + Sync>(
        &self,
        kind: &str,
        body: &B,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        let url = self.endpoint(&[routes::GOVERNANCE, routes::BUILD_TX, kind])?;
        let request = self
            .inner_client
            .request(Method::POST, url.clone())
            .json(body);
        let response = self.send(&url, request).await?;
        let built: BuildTxResponse = parse_response(url, response).await?;
        debug!(
            "received unsigned '{kind}' transaction (estimated gas: {:?})",
            built.estimated_gas
        );
        Ok(built)
    }
}

async fn parse_response<T: DeserializeOwned>(
    url: Url,
    response: Response,
) -> Result<T, GovernanceApiError> {
    let status = response.status();
    if !status.is_success() {
        // the body is only used for diagnostics
        let body = response.text().await.unwrap_or_default();
        return Err(GovernanceApiError::EndpointFailure {
            url: url.to_string(),
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| GovernanceApiError::ResponseDecodeFailure {
            url: url.to_string(),
            source,
        })
}

#[async_trait]
impl GovernanceApi for GovernanceApiClient {
    async fn get_proposals(&self) -> Result<Vec<ProposalSummary>, GovernanceApiError> {
        self.get_json(&[routes::GOVERNANCE, routes::PROPOSALS])
            .await
    }

    async fn get_proposal(&self, id: &ProposalId) -> Result<ProposalDetails, GovernanceApiError> {
        self.get_json(&[routes::GOVERNANCE, routes::PROPOSALS, id.as_str()])
            .await
    }

    async fn get_current_value(&self) -> Result<CurrentValue, GovernanceApiError> {
        self.get_json(&[routes::GOVERNANCE, routes::CURRENT_VALUE])
            .await
    }

    async fn get_network_stats(&self) -> Result<ChainStats, GovernanceApiError> {
        self.get_json(&[routes::NETWORK, routes::STATS]).await
    }

    async fn build_proposal_tx(
        &self,
        request: &NewProposalRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build_tx(routes::build_tx::PROPOSAL, request).await
    }

    async fn build_vote_tx(
        &self,
        request: &VoteRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build_tx(routes::build_tx::VOTE, request).await
    }

    async fn build_queue_tx(
        &self,
        request: &ProposalActionRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build_tx(routes::build_tx::QUEUE, request).await
    }

    async fn build_execute_tx(
        &self,
        request: &ProposalActionRequest,
    ) -> Result<BuildTxResponse, GovernanceApiError> {
        self.build_tx(routes::build_tx::EXECUTE, request).await
    }
}

pub struct ClientBuilder {
    base_url: Url,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GovernanceApiError> {
        let base_url = base_url.into();
        let parsed_url =
            Url::from_str(&base_url).map_err(|source| GovernanceApiError::MalformedServerUrl {
                raw: base_url.clone(),
                source,
            })?;
        Self::from_url(parsed_url)
    }

    pub fn from_url(base_url: Url) -> Result<Self, GovernanceApiError> {
        if base_url.cannot_be_a_base() {
            return Err(GovernanceApiError::UnsupportedServerUrl {
                raw: base_url.to_string(),
            });
        }
        Ok(ClientBuilder {
            base_url,
            user_agent: None,
        })
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<GovernanceApiClient, GovernanceApiError> {
        let user_agent = self.user_agent.unwrap_or_else(default_user_agent);
        Ok(GovernanceApiClient {
            base_url: self.base_url,
            inner_client: reqwest::ClientBuilder::new()
                .user_agent(user_agent)
                .build()
                .map_err(|source| GovernanceApiError::ClientBuildFailure { source })?,
        })
    }
}
