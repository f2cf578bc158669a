use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::util::with_retry;
use crate::core::cache::Cache;
use crate::core::currency::{CurrencyList, CurrencyListProvider, CurrencyRateProvider};

/// Base currency whose rate table doubles as the list of supported codes.
const LISTING_BASE: &str = "USD";

/// Latest rates for one base currency, in the order the API lists them.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestRates {
    pub base: String,
    pub rates: IndexMap<String, f64>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct OpenErResponse {
    result: String,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    rates: Option<IndexMap<String, f64>>,
}

/// Client for the open.er-api.com `latest` endpoint.
pub struct OpenErProvider {
    base_url: String,
    retries: usize,
    retry_delay_ms: u64,
    cache: Arc<Cache<String, LatestRates>>,
}

impl OpenErProvider {
    pub fn new(base_url: &str, cache: Arc<Cache<String, LatestRates>>) -> Self {
        OpenErProvider {
            base_url: base_url.to_string(),
            retries: 0,
            retry_delay_ms: 0,
            cache,
        }
    }

    pub fn with_retry_policy(mut self, retries: usize, retry_delay_ms: u64) -> Self {
        self.retries = retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    fn latest_url(&self, base: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid provider URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid provider URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v6", "latest", base]);
        Ok(url)
    }

    /// Latest rates for `base`, fetched at most once per process.
    pub async fn latest(&self, base: &str) -> Result<LatestRates> {
        let base = base.trim().to_uppercase();
        self.cache
            .get_or_try_insert_with(base.clone(), || self.fetch_latest(base.clone()))
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_latest(&self, base: String) -> Result<LatestRates> {
        let url = self.latest_url(&base)?;
        debug!("Requesting latest rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = with_retry(
            || client.get(url.clone()).send(),
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error_type = serde_json::from_str::<OpenErResponse>(&text)
                .ok()
                .and_then(|r| r.error_type);
            return Err(match error_type {
                Some(kind) => anyhow!(
                    "HTTP error: {} for base currency: {} ({})",
                    status,
                    base,
                    kind
                ),
                None => anyhow!("HTTP error: {} for base currency: {}", status, base),
            });
        }

        let data: OpenErResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        if data.result != "success" {
            return Err(anyhow!(
                "Rate API returned '{}' for base currency: {}{}",
                data.result,
                base,
                data.error_type
                    .map(|kind| format!(" ({kind})"))
                    .unwrap_or_default()
            ));
        }

        let rates = data
            .rates
            .ok_or_else(|| anyhow!("No rate data found for base currency: {}", base))?;
        debug!(count = rates.len(), "Received rates");

        Ok(LatestRates {
            base: data.base_code.unwrap_or(base),
            rates,
            last_update: data
                .time_last_update_unix
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        })
    }
}

#[async_trait]
impl CurrencyListProvider for OpenErProvider {
    async fn fetch_currencies(&self) -> Result<CurrencyList> {
        let latest = self
            .latest(LISTING_BASE)
            .await
            .context("Failed to load currency list")?;
        Ok(CurrencyList::from_codes(latest.rates.keys()))
    }
}

#[async_trait]
impl CurrencyRateProvider for OpenErProvider {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let to = to.trim().to_uppercase();
        let latest = self
            .latest(from)
            .await
            .with_context(|| format!("Could not fetch conversion rate from {from} to {to}"))?;

        latest
            .rates
            .get(&to)
            .copied()
            .filter(|rate| *rate > 0.0)
            .ok_or_else(|| {
                anyhow!(
                    "Could not fetch conversion rate from {} to {}",
                    latest.base,
                    to
                )
            })
    }

    async fn last_updated(&self, base: &str) -> Option<DateTime<Utc>> {
        self.latest(base).await.ok().and_then(|l| l.last_update)
    }
}
