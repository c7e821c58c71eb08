//! HTTP client for the screener backend and the per-panel fetchers built on
//! it.
//!
//! The client only knows endpoint paths and payload shapes; caching and
//! error capture belong to [`EntityCache`](crate::cache::EntityCache).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config;
use crate::error::{Result, ScreenerError};
use crate::fetcher::Fetcher;
use crate::models::{BrokerResearch, ComparisonData, CorporateActions, GeoAnalysis, MarketActions};

// ---------------------------------------------------------------------------
// ScreenerClientBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`ScreenerClient`].
pub struct ScreenerClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for ScreenerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl ScreenerClientBuilder {
    /// Backend origin, e.g. `http://localhost:8080`. A trailing `/` is
    /// ignored.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout. Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ScreenerClient> {
        let http = Client::builder().timeout(self.timeout).build()?;
        Ok(ScreenerClient {
            base_url: self.base_url,
            http,
        })
    }
}

// ---------------------------------------------------------------------------
// ScreenerClient
// ---------------------------------------------------------------------------

/// Async client for the `/api/v1/data-fetcher` endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ScreenerClient {
    base_url: String,
    http: Client,
}

impl ScreenerClient {
    pub fn builder() -> ScreenerClientBuilder {
        ScreenerClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str, ticker: Option<&str>) -> Result<String> {
        let endpoints = config::endpoints();
        let path = endpoints.get(endpoint).ok_or_else(|| {
            ScreenerError::NotFound(format!("Unknown endpoint: {}", endpoint))
        })?;
        let path = match ticker {
            Some(t) => path.replace("{ticker}", t),
            None => path.to_string(),
        };
        Ok(format!("{}{}/{}", self.base_url, config::API_PREFIX, path))
    }

    /// GET a JSON payload. Non-2xx statuses and `{"error": "..."}` bodies
    /// become errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!(url, ?query, "GET");
        let resp = self.http.get(url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.bytes().await?;
        if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(&body) {
            if let Some(Value::String(message)) = map.get("error") {
                return Err(ScreenerError::Backend(message.clone()));
            }
        }
        Ok(serde_json::from_slice(&body)?)
    }

    fn refresh_query(refresh: bool) -> Vec<(&'static str, String)> {
        if refresh {
            vec![("refresh", "true".to_string())]
        } else {
            Vec::new()
        }
    }

    /// Fetch metrics for a ticker set. Unknown tickers map to `None`.
    pub async fn compare(&self, tickers: &[String]) -> Result<ComparisonData> {
        if tickers.is_empty() {
            return Err(ScreenerError::InvalidArgument(
                "At least one ticker is required".into(),
            ));
        }
        let url = self.url("compare", None)?;
        self.get_json(&url, &[("tickers", tickers.join(","))]).await
    }

    pub async fn geo_analysis(&self, ticker: &str, refresh: bool) -> Result<GeoAnalysis> {
        let url = self.url("geo_analysis", Some(ticker))?;
        self.get_json(&url, &Self::refresh_query(refresh)).await
    }

    pub async fn corporate_actions(&self, ticker: &str, refresh: bool) -> Result<CorporateActions> {
        let url = self.url("corporate_actions", Some(ticker))?;
        self.get_json(&url, &Self::refresh_query(refresh)).await
    }

    pub async fn broker_research(
        &self,
        ticker: &str,
        refresh: bool,
    ) -> Result<Vec<BrokerResearch>> {
        let url = self.url("broker_research", Some(ticker))?;
        self.get_json(&url, &Self::refresh_query(refresh)).await
    }

    /// Market-wide corporate actions, for the current period or a given year.
    pub async fn market_actions(&self, year: Option<i32>) -> Result<MarketActions> {
        let url = self.url("market_actions", None)?;
        let query: Vec<(&str, String)> =
            year.map(|y| ("year", y.to_string())).into_iter().collect();
        self.get_json(&url, &query).await
    }
}

// ---------------------------------------------------------------------------
// Panel fetchers
// ---------------------------------------------------------------------------

/// Geographic revenue split and regional news.
#[derive(Clone)]
pub struct GeoFetcher(pub ScreenerClient);

#[async_trait]
impl Fetcher<GeoAnalysis> for GeoFetcher {
    async fn fetch(&self, id: &str, refresh: bool) -> Result<GeoAnalysis> {
        self.0.geo_analysis(id, refresh).await
    }
}

/// Per-ticker corporate action history.
#[derive(Clone)]
pub struct CorporateActionsFetcher(pub ScreenerClient);

#[async_trait]
impl Fetcher<CorporateActions> for CorporateActionsFetcher {
    async fn fetch(&self, id: &str, refresh: bool) -> Result<CorporateActions> {
        self.0.corporate_actions(id, refresh).await
    }
}

/// Broker recommendations.
#[derive(Clone)]
pub struct BrokerResearchFetcher(pub ScreenerClient);

#[async_trait]
impl Fetcher<Vec<BrokerResearch>> for BrokerResearchFetcher {
    async fn fetch(&self, id: &str, refresh: bool) -> Result<Vec<BrokerResearch>> {
        self.0.broker_research(id, refresh).await
    }
}
