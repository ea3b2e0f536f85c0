use crate::domain::prediction::PredictionSeries;
use crate::domain::price::{PricePoint, MILLIS_PER_DAY};
use crate::error::PipelineError;

/// `y = slope * x + intercept`, fitted per request and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Ordinary least squares over `(x, y)` pairs. With no spread in `x`
    /// the best fit is the flat line through the mean of `y`.
    pub fn fit(samples: &[(f64, f64)]) -> Result<Self, PipelineError> {
        if samples.is_empty() {
            return Err(PipelineError::InsufficientData);
        }

        let n = samples.len() as f64;
        let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxx, sxy) = samples.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fractional days elapsed since the earliest point of the series.
pub fn day_offsets(series: &[PricePoint]) -> Vec<f64> {
    let Some(origin) = series.iter().map(|p| p.timestamp_ms).min() else {
        return Vec::new();
    };
    series
        .iter()
        .map(|p| (p.timestamp_ms - origin) as f64 / MILLIS_PER_DAY)
        .collect()
}

/// Fits price against day offset and returns the in-sample trend value for
/// every observed point.
pub fn fit(series: &[PricePoint]) -> Result<PredictionSeries, PipelineError> {
    let offsets = day_offsets(series);
    let samples: Vec<(f64, f64)> = offsets
        .iter()
        .zip(series)
        .map(|(x, p)| (*x, p.price))
        .collect();
    let model = LinearModel::fit(&samples)?;

    let mut dates = Vec::with_capacity(series.len());
    for p in series {
        let date = p.date().ok_or_else(|| {
            PipelineError::upstream(format!("timestamp out of range: {}", p.timestamp_ms))
        })?;
        dates.push(date);
    }

    Ok(PredictionSeries {
        dates,
        prices: series.iter().map(|p| p.price).collect(),
        predictions: offsets.iter().map(|x| model.predict(*x)).collect(),
    })
}
