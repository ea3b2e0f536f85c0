use anyhow::ensure;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Observed prices and their in-sample trend values, aligned by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub predictions: Vec<f64>,
}

impl PredictionSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.prices.len() == self.dates.len() && self.predictions.len() == self.dates.len(),
            "series length mismatch: {} dates, {} prices, {} predictions",
            self.dates.len(),
            self.prices.len(),
            self.predictions.len()
        );
        Ok(())
    }
}

/// Body of `GET /predict/{asset_id}`. Failures travel as `{"error": "..."}`
/// with a 200 status, so clients branch on the shape rather than the code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Error { error: String },
    Series(PredictionSeries),
}

impl From<PredictionSeries> for PredictResponse {
    fn from(series: PredictionSeries) -> Self {
        Self::Series(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PredictionSeries {
        PredictionSeries {
            dates: vec![
                NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
            ],
            prices: vec![100.0, 102.0],
            predictions: vec![100.5, 101.5],
        }
    }

    #[test]
    fn serializes_series_with_iso_dates() {
        let v = serde_json::to_value(PredictResponse::from(sample())).unwrap();
        assert_eq!(
            v,
            json!({
                "dates": ["2026-01-27", "2026-01-28"],
                "prices": [100.0, 102.0],
                "predictions": [100.5, 101.5],
            })
        );
    }

    #[test]
    fn error_payload_has_only_error_key() {
        let v = serde_json::to_value(PredictResponse::Error {
            error: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(v, json!({"error": "boom"}));
    }

    #[test]
    fn deserializes_either_shape() {
        let err: PredictResponse = serde_json::from_value(json!({"error": "coin not found"})).unwrap();
        assert!(matches!(err, PredictResponse::Error { error } if error == "coin not found"));

        let ok: PredictResponse = serde_json::from_value(json!({
            "dates": ["2026-01-27"],
            "prices": [1.0],
            "predictions": [1.0],
        }))
        .unwrap();
        assert!(matches!(ok, PredictResponse::Series(s) if s.len() == 1));
    }

    #[test]
    fn validate_rejects_misaligned_series() {
        let mut series = sample();
        assert!(series.validate().is_ok());
        series.predictions.pop();
        assert!(series.validate().is_err());
    }
}
