//! Validator set reads.

use std::sync::Arc;

use crate::api::{ApiCore, ApiResponse};
use crate::config::ChainConfig;
use crate::mapper;
use crate::model::Validators;
use crate::transport::RequestConfig;
use crate::wire::ValidatorsResponse;

pub struct ValidatorsApi {
    core: ApiCore,
    config: Arc<ChainConfig>,
}

impl ValidatorsApi {
    pub(crate) fn new(core: ApiCore, config: Arc<ChainConfig>) -> Self {
        Self { core, config }
    }

    /// Drains the whole validator set and counts the bonded ones.
    pub async fn fetch_all_validators(&self, lock_screen: bool) -> ApiResponse<Validators> {
        let request = RequestConfig::get(format!(
            "{}/cosmos/staking/v1beta1/validators",
            self.config.api_url
        ));
        self.core
            .get_all_paginated(
                request,
                |body: ValidatorsResponse| mapper::map_validators(body.validators),
                |so_far, body: ValidatorsResponse| {
                    mapper::map_and_add_validators(so_far, body.validators)
                },
                lock_screen,
                None,
                "fetch_all_validators",
                None,
            )
            .await
    }
}
