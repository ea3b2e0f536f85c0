use crate::config::Settings;
use crate::domain::price::PricePoint;
use crate::error::PipelineError;
use crate::market::types::MarketChartResponse;
use crate::market::{HistoryWindow, MarketDataProvider};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::{Duration, Instant};

const VS_CURRENCY: &str = "usd";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.coingecko_api_url(),
            settings.coingecko_api_key.clone(),
            settings.market_data_timeout()?,
        )
    }

    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key,
        })
    }

    fn url(&self, asset_id: &str) -> String {
        format!(
            "{}/coins/{}/market_chart/range",
            self.base_url.trim_end_matches('/'),
            asset_id
        )
    }

    fn headers(&self) -> Result<HeaderMap, PipelineError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| PipelineError::upstream(format!("invalid API key header: {e}")))?;
            headers.insert(API_KEY_HEADER, value);
        }
        Ok(headers)
    }

    pub async fn fetch_range(
        &self,
        asset_id: &str,
        window: HistoryWindow,
    ) -> Result<Vec<PricePoint>, PipelineError> {
        let res = self
            .http
            .get(self.url(asset_id))
            .headers(self.headers()?)
            .query(&[
                ("vs_currency", VS_CURRENCY.to_string()),
                ("from", window.from.timestamp().to_string()),
                ("to", window.to.timestamp().to_string()),
            ])
            .send()
            .await
            .map_err(|e| PipelineError::upstream(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| PipelineError::upstream(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(PipelineError::upstream(format!("HTTP {status}: {text}")));
        }

        serde_json::from_str::<MarketChartResponse>(&text)
            .map_err(|e| PipelineError::upstream(format!("malformed market chart payload: {e}")))?
            .into_price_points()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for CoinGeckoClient {
    fn provider_name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch_history(&self, asset_id: &str) -> Result<Vec<PricePoint>, PipelineError> {
        let started = Instant::now();
        let points = self.fetch_range(asset_id, HistoryWindow::trailing()).await?;
        tracing::debug!(
            asset_id,
            points = points.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched market chart"
        );
        Ok(points)
    }
}
