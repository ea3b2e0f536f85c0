use std::collections::HashMap;
use std::sync::Arc;

use trendcast_core::domain::prediction::PredictionSeries;

use crate::client::ClientError;

pub const ASSETS: [&str; 10] = [
    "bitcoin",
    "ethereum",
    "solana",
    "cardano",
    "ripple",
    "dogecoin",
    "avalanche",
    "polkadot",
    "shiba-inu",
    "toncoin",
];

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading {
        asset: String,
    },
    Rendered {
        asset: String,
        series: Arc<PredictionSeries>,
    },
    Error {
        asset: String,
        message: String,
    },
}

/// What a worker thread reports back to the UI thread.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub asset: String,
    pub result: Result<PredictionSeries, ClientError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPlan {
    /// Served from the client cache; nothing to spawn.
    Cached,
    Fetch { generation: u64 },
}

/// Display state plus client-side cache. Only the UI thread touches this.
///
/// Every load stamps a new generation; an outcome carrying anything but the
/// latest generation never reaches the display.
#[derive(Debug)]
pub struct Dashboard {
    state: LoadState,
    cache: HashMap<String, Arc<PredictionSeries>>,
    latest_generation: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            cache: HashMap::new(),
            latest_generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    pub fn cached(&self, asset: &str) -> Option<&Arc<PredictionSeries>> {
        self.cache.get(asset)
    }

    pub fn begin_load(&mut self, asset: &str, bypass_cache: bool) -> LoadPlan {
        self.latest_generation += 1;

        if !bypass_cache {
            if let Some(series) = self.cached(asset).cloned() {
                self.state = LoadState::Rendered {
                    asset: asset.to_string(),
                    series,
                };
                return LoadPlan::Cached;
            }
        }

        self.state = LoadState::Loading {
            asset: asset.to_string(),
        };
        LoadPlan::Fetch {
            generation: self.latest_generation,
        }
    }

    /// Returns whether the outcome was applied to the display. Successful
    /// stale outcomes still populate the cache.
    pub fn complete(&mut self, outcome: LoadOutcome) -> bool {
        let LoadOutcome {
            generation,
            asset,
            result,
        } = outcome;

        let result = result.map(|series| {
            let series = Arc::new(series);
            self.cache.insert(asset.clone(), Arc::clone(&series));
            series
        });

        if generation != self.latest_generation {
            tracing::debug!(
                %asset,
                generation,
                latest = self.latest_generation,
                "discarding stale load result"
            );
            return false;
        }

        self.state = match result {
            Ok(series) => LoadState::Rendered { asset, series },
            Err(err) => {
                tracing::warn!(%asset, error = %err, "load failed");
                LoadState::Error {
                    asset,
                    message: err.to_string(),
                }
            }
        };
        true
    }
}
