use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// One observed price, as returned by the market data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Price in USD.
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }

    /// UTC calendar day the point falls on.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp().map(|t| t.date_naive())
    }
}
