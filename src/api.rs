//! Call wrapper and pagination drainer shared by every API.
//!
//! Every public operation funnels through [`ApiCore`]: one place that
//! scopes the busy indicator, logs request/response traffic, normalizes
//! transport failures into [`ErrorData`] and converts mapping failures
//! into the same error envelope instead of letting them propagate.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::busy::{BusyTracker, LocalSpinner};
use crate::response::{blockchain_error_info, BlockchainApiError, ErrorData, RequestResponse};
use crate::transport::{RequestConfig, Transport, TransportError};

/// Cursor state for one paginated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockchainPagination {
    pub key: Option<String>,
    pub limit: Option<u64>,
    pub reverse: bool,
}

impl BlockchainPagination {
    pub fn from_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    fn apply(&self, mut request: RequestConfig) -> RequestConfig {
        if let Some(key) = &self.key {
            request = request.with_query("pagination.key", key);
        }
        if let Some(limit) = self.limit {
            request = request.with_query("pagination.limit", limit.to_string());
        }
        if self.reverse {
            request = request.with_query("pagination.reverse", "true");
        }
        request
    }
}

/// Hook deciding whether a failure is reportable or an expected state.
pub type DisplayAsError = dyn Fn(&ErrorData<BlockchainApiError>) -> bool + Send + Sync;

pub type ApiResponse<T> = RequestResponse<T, ErrorData<BlockchainApiError>>;

#[derive(Clone)]
pub struct ApiCore {
    transport: Arc<dyn Transport>,
    busy: Arc<BusyTracker>,
}

impl ApiCore {
    pub fn new(transport: Arc<dyn Transport>, busy: Arc<BusyTracker>) -> Self {
        Self { transport, busy }
    }

    pub fn busy_tracker(&self) -> &Arc<BusyTracker> {
        &self.busy
    }

    /// GET with body mapping.
    pub async fn get<BC, T>(
        &self,
        request: RequestConfig,
        map_data: impl FnOnce(BC) -> crate::Result<T>,
        lock_screen: bool,
        local_spinner: Option<Arc<dyn LocalSpinner>>,
        log_prefix: &str,
        display_as_error: Option<&DisplayAsError>,
    ) -> ApiResponse<T>
    where
        BC: DeserializeOwned,
    {
        match self
            .call::<BC>(request, lock_screen, local_spinner, log_prefix, display_as_error)
            .await
        {
            RequestResponse::Success(body) => self.map_body(body, map_data, log_prefix),
            RequestResponse::Error(err) => RequestResponse::Error(err),
        }
    }

    /// GET with body mapping and an error hook that may turn an expected
    /// failure into a synthetic success.
    pub async fn get_handled<BC, T>(
        &self,
        request: RequestConfig,
        map_data: impl FnOnce(BC) -> crate::Result<T>,
        lock_screen: bool,
        local_spinner: Option<Arc<dyn LocalSpinner>>,
        log_prefix: &str,
        display_as_error: Option<&DisplayAsError>,
        handle_error: impl FnOnce(ErrorData<BlockchainApiError>) -> ApiResponse<T>,
    ) -> ApiResponse<T>
    where
        BC: DeserializeOwned,
    {
        match self
            .call::<BC>(request, lock_screen, local_spinner, log_prefix, display_as_error)
            .await
        {
            RequestResponse::Success(body) => self.map_body(body, map_data, log_prefix),
            RequestResponse::Error(err) => handle_error(err),
        }
    }

    /// Fetches one page and hands the cursor back to the caller.
    pub async fn get_paginated<BC, T>(
        &self,
        request: RequestConfig,
        pagination: Option<&BlockchainPagination>,
        map_data: impl FnOnce(BC) -> crate::Result<T>,
        lock_screen: bool,
        local_spinner: Option<Arc<dyn LocalSpinner>>,
        log_prefix: &str,
        display_as_error: Option<&DisplayAsError>,
    ) -> (ApiResponse<T>, Option<String>)
    where
        BC: DeserializeOwned + crate::wire::Paginated,
    {
        let request = match pagination {
            Some(pagination) => pagination.apply(request),
            None => request,
        };
        match self
            .call::<BC>(request, lock_screen, local_spinner, log_prefix, display_as_error)
            .await
        {
            RequestResponse::Success(body) => {
                let next_key = body.next_key().map(str::to_owned);
                (self.map_body(body, map_data, log_prefix), next_key)
            }
            RequestResponse::Error(err) => (RequestResponse::Error(err), None),
        }
    }

    /// Drains a paginated endpoint into a single accumulated result.
    ///
    /// The first page goes through `map_data`, later pages fold into the
    /// accumulator through `map_and_add_data`. Any page failure aborts
    /// the whole sequence; partial results are never reported as success.
    /// Iterative on purpose: validator and delegation sets are unbounded.
    pub async fn get_all_paginated<BC, T>(
        &self,
        request: RequestConfig,
        map_data: impl Fn(BC) -> crate::Result<T>,
        map_and_add_data: impl Fn(T, BC) -> crate::Result<T>,
        lock_screen: bool,
        local_spinner: Option<Arc<dyn LocalSpinner>>,
        log_prefix: &str,
        display_as_error: Option<&DisplayAsError>,
    ) -> ApiResponse<T>
    where
        BC: DeserializeOwned + crate::wire::Paginated,
    {
        let mut accumulated: Option<T> = None;
        let mut next_key: Option<String> = None;
        loop {
            let page_request = match next_key.take() {
                Some(key) => BlockchainPagination::from_key(key).apply(request.clone()),
                None => request.clone(),
            };
            let body = match self
                .call::<BC>(
                    page_request,
                    lock_screen,
                    local_spinner.clone(),
                    log_prefix,
                    display_as_error,
                )
                .await
            {
                RequestResponse::Success(body) => body,
                RequestResponse::Error(err) => return RequestResponse::Error(err),
            };
            next_key = body.next_key().map(str::to_owned);
            let step = match accumulated.take() {
                None => map_data(body),
                Some(so_far) => map_and_add_data(so_far, body),
            };
            match step {
                Ok(merged) => {
                    if next_key.is_none() {
                        return RequestResponse::Success(merged);
                    }
                    accumulated = Some(merged);
                }
                Err(err) => return self.mapping_error(err, log_prefix),
            }
        }
    }

    /// Performs the request and normalizes failures; no body mapping.
    async fn call<BC>(
        &self,
        request: RequestConfig,
        lock_screen: bool,
        local_spinner: Option<Arc<dyn LocalSpinner>>,
        log_prefix: &str,
        display_as_error: Option<&DisplayAsError>,
    ) -> ApiResponse<BC>
    where
        BC: DeserializeOwned,
    {
        let _busy = self.busy.acquire(lock_screen, local_spinner);
        debug!("[{log_prefix}] request: {} {}", request.method, request.display_url());
        match self.transport.request(&request).await {
            Ok(body) => {
                debug!("[{log_prefix}] response: {body}");
                match serde_json::from_value::<BC>(body) {
                    Ok(typed) => RequestResponse::Success(typed),
                    Err(err) => self.mapping_error(err.into(), log_prefix),
                }
            }
            Err(err) => {
                let error_data = match err {
                    TransportError::Status {
                        message,
                        status,
                        body,
                    } => ErrorData::with_response(
                        "RequestError",
                        message,
                        status,
                        serde_json::from_str(&body).ok(),
                        Some(blockchain_error_info),
                    ),
                    TransportError::Network { message } => ErrorData::new("RequestError", message),
                };
                let reportable = display_as_error.map_or(true, |decide| decide(&error_data));
                if reportable {
                    error!("[{log_prefix}] request error:\n{}", error_data.info());
                } else {
                    debug!("[{log_prefix}] expected error:\n{}", error_data.info());
                }
                RequestResponse::Error(error_data)
            }
        }
    }

    fn map_body<BC, T>(
        &self,
        body: BC,
        map_data: impl FnOnce(BC) -> crate::Result<T>,
        log_prefix: &str,
    ) -> ApiResponse<T> {
        match map_data(body) {
            Ok(mapped) => RequestResponse::Success(mapped),
            Err(err) => self.mapping_error(err, log_prefix),
        }
    }

    fn mapping_error<T>(&self, err: anyhow::Error, log_prefix: &str) -> ApiResponse<T> {
        error!("[{log_prefix}] mapping error: {err}");
        RequestResponse::Error(ErrorData::new("MappingError", err.to_string()))
    }
}
