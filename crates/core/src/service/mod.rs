pub mod cache;

use crate::domain::prediction::{PredictResponse, PredictionSeries};
use crate::error::PipelineError;
use crate::market::MarketDataProvider;
use crate::predict;
use cache::AssetCache;
use std::sync::Arc;

/// Fetch -> cache -> fit orchestration behind `GET /predict/{asset_id}`.
#[derive(Clone)]
pub struct PredictionService {
    provider: Arc<dyn MarketDataProvider>,
    cache: AssetCache,
}

impl PredictionService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_cache(provider, AssetCache::new())
    }

    pub fn with_cache(provider: Arc<dyn MarketDataProvider>, cache: AssetCache) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Only raw prices are cached; the trend is refit on every call.
    pub async fn predict(&self, asset_id: &str) -> Result<PredictionSeries, PipelineError> {
        let series = match self.cache.get(asset_id).await {
            Some(series) => {
                tracing::debug!(asset_id, points = series.len(), "asset cache hit");
                series
            }
            None => {
                tracing::info!(
                    asset_id,
                    provider = self.provider.provider_name(),
                    "asset cache miss; fetching history"
                );
                let fetched = self.provider.fetch_history(asset_id).await?;
                if fetched.is_empty() {
                    return Err(PipelineError::InsufficientData);
                }
                self.cache.insert(asset_id, fetched).await
            }
        };

        predict::fit(&series)
    }

    pub async fn handle_predict(&self, asset_id: &str) -> PredictResponse {
        match self.predict(asset_id).await {
            Ok(series) => series.into(),
            Err(err) => {
                tracing::warn!(asset_id, error = %err, "prediction failed");
                PredictResponse::Error {
                    error: err.to_string(),
                }
            }
        }
    }
}
