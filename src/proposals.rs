//! Governance proposal reads.

use std::sync::Arc;

use crate::api::{ApiCore, ApiResponse, BlockchainPagination};
use crate::config::ChainConfig;
use crate::mapper;
use crate::model::{Proposal, Proposals};
use crate::transport::RequestConfig;
use crate::wire::{ProposalResponse, ProposalsResponse};

/// Page size for the proposal list; newest first.
const PROPOSALS_PAGE_LIMIT: u64 = 10;

pub struct ProposalsApi {
    core: ApiCore,
    config: Arc<ChainConfig>,
}

impl ProposalsApi {
    pub(crate) fn new(core: ApiCore, config: Arc<ChainConfig>) -> Self {
        Self { core, config }
    }

    fn url(&self, path: &str) -> RequestConfig {
        RequestConfig::get(format!("{}{}", self.config.api_url, path))
    }

    /// Fetches one page of proposals. The caller keeps the returned
    /// next-key and passes it back in to continue where it left off.
    pub async fn fetch_proposals(
        &self,
        pagination_key: Option<&str>,
        lock_screen: bool,
    ) -> (ApiResponse<Proposals>, Option<String>) {
        let mut pagination = BlockchainPagination::default()
            .with_limit(PROPOSALS_PAGE_LIMIT)
            .reversed();
        pagination.key = pagination_key.map(str::to_owned);
        self.core
            .get_paginated(
                self.url("/cosmos/gov/v1beta1/proposals"),
                Some(&pagination),
                |body: ProposalsResponse| mapper::map_proposals(body.proposals),
                lock_screen,
                None,
                "fetch_proposals",
                None,
            )
            .await
    }

    pub async fn fetch_proposal_by_id(&self, id: u64, lock_screen: bool) -> ApiResponse<Proposal> {
        self.core
            .get(
                self.url(&format!("/cosmos/gov/v1beta1/proposals/{id}")),
                |body: ProposalResponse| mapper::map_proposal(body.proposal),
                lock_screen,
                None,
                "fetch_proposal_by_id",
                None,
            )
            .await
    }
}
