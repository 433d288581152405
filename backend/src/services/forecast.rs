//! Short-horizon forecasting: exponential smoothing and a seasonal-naive
//! trend model.

use crate::stats::descriptive::{mean, ols_slope};

/// Exponentially smoothed copy of `values`.
///
/// The first element seeds the recursion unchanged; an empty input gives an
/// empty result.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(values.len());
    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            smoothed.push(value);
        } else {
            smoothed.push(alpha * value + (1.0 - alpha) * smoothed[i - 1]);
        }
    }
    smoothed
}

/// Final exponentially smoothed level, or 0 for an empty series.
pub fn smoothed_level(values: &[f64], alpha: f64) -> f64 {
    exponential_smoothing(values, alpha)
        .last()
        .copied()
        .unwrap_or(0.0)
}

/// Forecast `horizon` whole-appointment values ahead of a daily series.
///
/// Combines the last observation, an OLS trend, and a 7-period seasonal
/// component (per-weekday mean of de-meaned values). Forecasts are floored
/// at zero. An empty series forecasts zeros.
pub fn seasonal_trend_forecast(values: &[f64], horizon: usize) -> Vec<u32> {
    if values.is_empty() {
        return vec![0; horizon];
    }
    let overall_mean = mean(values);
    let trend = ols_slope(values);

    let mut seasonal = [0.0f64; 7];
    let mut counts = [0usize; 7];
    for (i, &value) in values.iter().enumerate() {
        seasonal[i % 7] += value - overall_mean;
        counts[i % 7] += 1;
    }
    for day in 0..7 {
        if counts[day] > 0 {
            seasonal[day] /= counts[day] as f64;
        }
    }

    let last = values[values.len() - 1];
    (1..=horizon)
        .map(|step| {
            let raw = last + trend * step as f64 + seasonal[step % 7];
            raw.round().max(0.0) as u32
        })
        .collect()
}
