use anyhow::Context;
use thiserror::Error;
use trendcast_core::domain::prediction::{PredictResponse, PredictionSeries};

/// Why a load produced no chart. Both kinds end up verbatim in the status
/// line; nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("cannot reach prediction service: {0}")]
    Transport(String),
    #[error("{0}")]
    Service(String),
}

/// Blocking client for the prediction service. Called from worker threads
/// only, never from the UI thread.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .context("failed to build prediction service http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, asset_id: &str) -> String {
        format!("{}/predict/{}", self.base_url, asset_id)
    }

    pub fn fetch_prediction(&self, asset_id: &str) -> Result<PredictionSeries, ClientError> {
        let res = self
            .http
            .get(self.url(asset_id))
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Transport(format!("HTTP {status}")));
        }

        let body = res
            .json::<PredictResponse>()
            .map_err(|e| ClientError::Transport(format!("invalid response body: {e}")))?;

        match body {
            PredictResponse::Error { error } => Err(ClientError::Service(error)),
            PredictResponse::Series(series) => {
                series
                    .validate()
                    .map_err(|e| ClientError::Service(format!("{e:#}")))?;
                Ok(series)
            }
        }
    }
}
