use super::util::with_retry;
use crate::core::config::ProviderConfig;
use crate::core::currency::{BASE_CURRENCY, RateProvider, RateTable};
use crate::core::error::RateError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    date: Option<String>,
    rates: HashMap<String, f64>,
}

/// Fetches the latest USD-based table from exchangerate-api.com style
/// endpoints (`{base_url}/v4/latest/USD`).
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl ExchangeRateApiProvider {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        retries: usize,
        retry_delay_ms: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retries,
            retry_delay_ms,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            config.timeout(),
            config.retries,
            config.retry_delay_ms,
        )
    }

    fn describe(err: &reqwest::Error) -> String {
        if let Some(status) = err.status() {
            format!("HTTP error: {status}")
        } else if err.is_timeout() {
            "request timed out".to_string()
        } else {
            format!("Request error: {err}")
        }
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = BASE_CURRENCY))]
    async fn fetch_rates(&self) -> Result<RateTable, RateError> {
        let url = format!("{}/v4/latest/{}", self.base_url, BASE_CURRENCY);
        debug!("Requesting exchange rates from {}", url);

        let response = with_retry(
            || async { self.client.get(&url).send().await?.error_for_status() },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(|e| RateError::Fetch(Self::describe(&e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| RateError::Fetch(format!("Failed to read response body: {e}")))?;

        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            RateError::MalformedResponse(format!("Failed to parse JSON response: {e}"))
        })?;

        if let Some(base) = &data.base {
            if base != BASE_CURRENCY {
                return Err(RateError::MalformedResponse(format!(
                    "rates are quoted against {base}, expected {BASE_CURRENCY}"
                )));
            }
        }
        if data.rates.is_empty() {
            return Err(RateError::MalformedResponse("no rates in response".to_string()));
        }

        let mut table = RateTable::new(data.rates)?;
        match data.date.as_deref().map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d")) {
            Some(Ok(date)) => table = table.with_date(date),
            Some(Err(e)) => warn!(error = %e, "Ignoring unparseable rate date"),
            None => {}
        }

        debug!(currencies = table.len(), "Received exchange rates");
        Ok(table)
    }
}
