pub mod coingecko;
pub mod types;

use crate::domain::price::PricePoint;
use crate::error::PipelineError;
use chrono::{DateTime, Duration, Utc};

pub const HISTORY_DAYS: i64 = 30;

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Recent price history for `asset_id`, oldest first.
    async fn fetch_history(&self, asset_id: &str) -> Result<Vec<PricePoint>, PipelineError>;
}

/// Trailing request window, recomputed on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl HistoryWindow {
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            from: now - Duration::days(HISTORY_DAYS),
            to: now,
        }
    }

    pub fn trailing() -> Self {
        Self::ending_at(Utc::now())
    }
}
