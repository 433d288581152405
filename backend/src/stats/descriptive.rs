//! Descriptive statistics over in-memory series.

use serde::{Deserialize, Serialize};

/// 95% confidence interval around a sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Zero-width interval at `value`.
    fn degenerate(value: f64) -> Self {
        Self {
            mean: value,
            lower: value,
            upper: value,
        }
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance; 0 when fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// 95% confidence interval, `mean ± 1.96 * standard error`.
///
/// An empty slice yields a zero interval; a single value yields a zero-width
/// interval at that value.
pub fn confidence_interval_95(values: &[f64]) -> ConfidenceInterval {
    if values.is_empty() {
        return ConfidenceInterval::degenerate(0.0);
    }
    let m = mean(values);
    if values.len() < 2 {
        return ConfidenceInterval::degenerate(m);
    }
    let std_error = (sample_variance(values) / values.len() as f64).sqrt();
    let margin = 1.96 * std_error;
    ConfidenceInterval {
        mean: m,
        lower: m - margin,
        upper: m + margin,
    }
}

/// Linear-interpolation percentile over pre-sorted data, `p` in `[0, 1]`.
///
/// Out-of-range `p` is clamped; an empty slice yields 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let clamped = p.clamp(0.0, 1.0);
    let index = clamped * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// First and third quartiles of pre-sorted data.
pub fn quartiles(sorted: &[f64]) -> (f64, f64) {
    (percentile(sorted, 0.25), percentile(sorted, 0.75))
}

/// Coefficient of variation, `std_dev / mean`; 0 when the mean is 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    std_dev(values) / m
}

/// Ordinary-least-squares slope against the index sequence `1..=n`.
///
/// Fewer than two points, or a degenerate denominator, give slope 0.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x = (i + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let denominator = nf * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (nf * sum_xy - sum_x * sum_y) / denominator
}

/// Ascending sorted copy; NaN sorts as equal.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    out
}
