use std::time::Duration;

use chrono::NaiveDate;
use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

use crate::config::{ApiConfig, DEFAULT_DATES_LIMIT};

use super::error::{ApiError, TransportError};
use super::types::{
    AssetPage, AssetRecord, DatesResponse, FilterCriteria, HealthResponse, TickersResponse,
};

/// Status and body of any HTTP response, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP GET mechanism used by [`ApiClient`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<RawResponse, TransportError>;
}

/// Browser `fetch` transport with a fixed request timeout.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    timeout: Duration,
}

impl FetchTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Transport for FetchTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<RawResponse, TransportError> {
        let request = Request::get(url)
            .header("Content-Type", "application/json")
            .query(query.iter().map(|(key, value)| (*key, value.as_str())))
            .build()
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let timeout_ms = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        // Headers and body share one deadline; `fetch` resolves before the body arrives.
        let exchange = async move {
            let response = request
                .send()
                .await
                .map_err(|err| TransportError::NoResponse(err.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| TransportError::NoResponse(err.to_string()))?;
            Ok::<_, TransportError>(RawResponse { status, body })
        };

        with_deadline(exchange, TimeoutFuture::new(timeout_ms), timeout_ms).await
    }
}

/// Resolve `exchange` unless `deadline` fires first, which counts as no response.
async fn with_deadline<F, D>(
    exchange: F,
    deadline: D,
    timeout_ms: u32,
) -> Result<RawResponse, TransportError>
where
    F: Future<Output = Result<RawResponse, TransportError>>,
    D: Future<Output = ()>,
{
    match select(Box::pin(exchange), Box::pin(deadline)).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => Err(TransportError::NoResponse(format!(
            "request timed out after {timeout_ms}ms"
        ))),
    }
}

/// Client for the assets REST API.
#[derive(Debug, Clone)]
pub struct ApiClient<T = FetchTransport> {
    config: ApiConfig,
    transport: T,
}

impl ApiClient<FetchTransport> {
    pub fn new(config: ApiConfig) -> Self {
        let transport = FetchTransport::new(config.timeout);
        Self { config, transport }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one page of records matching `criteria`.
    pub async fn fetch_assets(
        &self,
        criteria: &FilterCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<AssetPage, ApiError> {
        self.get_json("/api/assets", &asset_query(criteria, page, page_size))
            .await
    }

    pub async fn fetch_asset_by_id(&self, id: i64) -> Result<AssetRecord, ApiError> {
        self.get_json(&format!("/api/assets/{id}"), &[]).await
    }

    /// Ticker symbols known to the API; empty when the field is missing.
    pub async fn fetch_available_tickers(&self) -> Result<Vec<String>, ApiError> {
        let response: TickersResponse = self.get_json("/api/assets/meta/tickers", &[]).await?;
        Ok(response.tickers)
    }

    pub async fn fetch_available_dates(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<NaiveDate>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_DATES_LIMIT);
        let response: DatesResponse = self
            .get_json("/api/assets/meta/dates", &[("limit", limit.to_string())])
            .await?;
        Ok(response.dates)
    }

    /// `true` only when the API answers 2xx with `status == "ok"`. Never fails.
    pub async fn check_health(&self) -> bool {
        match self.get_json::<HealthResponse>("/api/health", &[]).await {
            Ok(response) => response.status.as_deref() == Some("ok"),
            Err(err) => {
                log::warn!("health check failed: {err:?}");
                false
            }
        }
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<R, ApiError> {
        let url = self.config.url(path);
        let outcome = self.transport.get(&url, query).await;
        map_response(outcome)
            .inspect_err(|err| log::error!("request to {url} failed: {err:?}"))
    }
}

/// Full `/api/assets` query: present criteria followed by `page` and `size`.
pub fn asset_query(
    criteria: &FilterCriteria,
    page: u32,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    let mut params = criteria.query_params();
    params.push(("page", page.to_string()));
    params.push(("size", page_size.to_string()));
    params
}

fn map_response<R: DeserializeOwned>(
    outcome: Result<RawResponse, TransportError>,
) -> Result<R, ApiError> {
    let response = outcome?;
    if !response.is_success() {
        return Err(ApiError::from_response(response.status, &response.body));
    }
    Ok(serde_json::from_str(&response.body)?)
}
