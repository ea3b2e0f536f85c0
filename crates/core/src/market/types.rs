use crate::domain::price::PricePoint;
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// `market_chart/range` payload. Only `prices` is consumed; volumes and
/// market caps are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<[f64; 2]>,
}

impl MarketChartResponse {
    pub fn into_price_points(self) -> Result<Vec<PricePoint>, PipelineError> {
        let mut points = Vec::with_capacity(self.prices.len());
        for [ts, price] in self.prices {
            if !ts.is_finite() || ts < 0.0 || ts > i64::MAX as f64 {
                return Err(PipelineError::upstream(format!(
                    "invalid timestamp in market chart: {ts}"
                )));
            }
            if !price.is_finite() {
                return Err(PipelineError::upstream(format!(
                    "invalid price in market chart: {price}"
                )));
            }
            let point = PricePoint::new(ts as i64, price);
            if point.date().is_none() {
                return Err(PipelineError::upstream(format!(
                    "timestamp out of range in market chart: {ts}"
                )));
            }
            points.push(point);
        }
        points.sort_by_key(|p| p.timestamp_ms);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_prices_and_ignores_other_series() {
        let v = json!({
            "prices": [[1700000000000u64, 35000.5], [1700003600000u64, 35010.0]],
            "market_caps": [[1700000000000u64, 1.0]],
            "total_volumes": [],
        });
        let parsed: MarketChartResponse = serde_json::from_value(v).unwrap();
        let points = parsed.into_price_points().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PricePoint::new(1_700_000_000_000, 35000.5));
    }

    #[test]
    fn sorts_points_by_timestamp() {
        let parsed = MarketChartResponse {
            prices: vec![[2_000.0, 2.0], [1_000.0, 1.0]],
        };
        let points = parsed.into_price_points().unwrap();
        assert_eq!(points[0].timestamp_ms, 1_000);
        assert_eq!(points[1].timestamp_ms, 2_000);
    }

    #[test]
    fn rejects_missing_prices_via_deserialize() {
        let res = serde_json::from_value::<MarketChartResponse>(json!({"error": "coin not found"}));
        assert!(res.is_err());
    }

    #[test]
    fn rejects_negative_timestamps() {
        let parsed = MarketChartResponse {
            prices: vec![[-5.0, 1.0]],
        };
        assert!(matches!(
            parsed.into_price_points(),
            Err(PipelineError::Upstream(_))
        ));
    }
}
