//! Trend and distribution tests used to flag significant changes.
//!
//! The normality check and the t-test p-value are deliberately coarse
//! approximations; they trade statistical rigor for stable, total behavior
//! on small operational samples. See the individual function docs.

use serde::{Deserialize, Serialize};

use crate::stats::descriptive::{mean, sample_variance, sorted_copy};

/// Abramowitz & Stegun 7.1.26 polynomial coefficients for erf.
const ERF_A1: f64 = 0.254829592;
const ERF_A2: f64 = -0.284496736;
const ERF_A3: f64 = 1.421413741;
const ERF_A4: f64 = -1.453152027;
const ERF_A5: f64 = 1.061405429;
const ERF_P: f64 = 0.3275911;

/// Significance level used for every hypothesis test here.
const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Result of the simplified normality check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub w_statistic: f64,
    #[serde(rename = "isNormal")]
    pub is_normal: bool,
}

/// Result of the two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Pearson-style lag autocorrelation.
///
/// Returns 0 when the series is no longer than `lag` or has zero variance.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if n <= lag {
        return 0.0;
    }
    let m = mean(values);
    let denominator: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    if denominator == 0.0 {
        return 0.0;
    }
    let numerator: f64 = (0..n - lag)
        .map(|i| (values[i] - m) * (values[i + lag] - m))
        .sum();
    numerator / denominator
}

/// Weekly seasonality flag: lag-7 autocorrelation above 0.3 in magnitude,
/// with at least two full weeks of data.
pub fn detect_seasonality(values: &[f64]) -> bool {
    values.len() >= 14 && autocorrelation(values, 7).abs() > 0.3
}

/// Simplified normality check on a W-like statistic.
///
/// Sorts the sample, sums squared extreme-pair differences and normalizes by
/// `(n - 1) * variance`. This is in the spirit of Shapiro-Wilk, not an
/// implementation of it; the 0.9 cutoff is heuristic. Samples smaller than 3
/// or with zero variance report not-normal with a zero statistic.
pub fn normality_check(values: &[f64]) -> NormalityResult {
    let n = values.len();
    if n < 3 {
        return NormalityResult {
            w_statistic: 0.0,
            is_normal: false,
        };
    }
    let variance = sample_variance(values);
    if variance == 0.0 {
        return NormalityResult {
            w_statistic: 0.0,
            is_normal: false,
        };
    }
    let sorted = sorted_copy(values);
    let mut paired = 0.0;
    for i in 0..n / 2 {
        let diff = sorted[n - 1 - i] - sorted[i];
        paired += diff * diff;
    }
    let w = paired / ((n as f64 - 1.0) * variance);
    NormalityResult {
        w_statistic: w,
        is_normal: w > 0.9,
    }
}

/// Two-sample t-test on a pooled-variance statistic.
///
/// The two-sided p-value uses a normal-CDF approximation instead of the t
/// distribution, which is adequate for the change-flagging done here. Either
/// sample having fewer than two values, or zero pooled variance, yields the
/// neutral result `t = 0, p = 1`.
pub fn two_sample_t_test(first: &[f64], second: &[f64]) -> TTestResult {
    if first.len() < 2 || second.len() < 2 {
        return TTestResult {
            t_statistic: 0.0,
            p_value: 1.0,
            significant: false,
        };
    }
    let n1 = first.len() as f64;
    let n2 = second.len() as f64;
    let v1 = sample_variance(first);
    let v2 = sample_variance(second);
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / (n1 + n2 - 2.0);
    if pooled <= 0.0 {
        return TTestResult {
            t_statistic: 0.0,
            p_value: 1.0,
            significant: false,
        };
    }
    let t = (mean(first) - mean(second)) / (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let p = (2.0 * (1.0 - standard_normal_cdf(t.abs()))).clamp(0.0, 1.0);
    TTestResult {
        t_statistic: t,
        p_value: p,
        significant: p < SIGNIFICANCE_LEVEL,
    }
}

/// Standard normal CDF via the polynomial erf approximation.
fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf_approx(x / std::f64::consts::SQRT_2))
}

/// Abramowitz & Stegun five-term erf approximation (formula 7.1.26).
///
/// Maximum absolute error about 1.5e-7.
fn erf_approx(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ((((ERF_A5 * t + ERF_A4) * t + ERF_A3) * t + ERF_A2) * t + ERF_A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SimRng;
    use crate::sim::variates::normal;

    #[test]
    fn test_autocorrelation_alternating_series() {
        let values: Vec<f64> = (0..16).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let r = autocorrelation(&values, 1);
        assert!(r < -0.9, "lag-1 autocorrelation was {r}");
    }

    #[test]
    fn test_autocorrelation_degenerate_inputs() {
        assert_eq!(autocorrelation(&[], 1), 0.0);
        assert_eq!(autocorrelation(&[1.0, 2.0], 7), 0.0);
        assert_eq!(autocorrelation(&[5.0, 5.0, 5.0, 5.0], 1), 0.0);
    }

    #[test]
    fn test_detect_seasonality_weekly_pattern() {
        // Four weeks with a pronounced Monday spike.
        let mut values = Vec::new();
        for _ in 0..4 {
            values.extend_from_slice(&[10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        }
        assert!(detect_seasonality(&values));
    }

    #[test]
    fn test_detect_seasonality_needs_two_weeks() {
        let one_week = [10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert!(!detect_seasonality(&one_week));
    }

    #[test]
    fn test_detect_seasonality_flat_series() {
        let values = vec![7.0; 28];
        assert!(!detect_seasonality(&values));
    }

    #[test]
    fn test_normality_check_small_or_constant_sample() {
        let result = normality_check(&[1.0, 2.0]);
        assert_eq!(result.w_statistic, 0.0);
        assert!(!result.is_normal);

        let result = normality_check(&[3.0, 3.0, 3.0, 3.0]);
        assert_eq!(result.w_statistic, 0.0);
        assert!(!result.is_normal);
    }

    #[test]
    fn test_normality_check_accepts_normal_sample() {
        let mut source = SimRng::seeded(42);
        let values: Vec<f64> = (0..200).map(|_| normal(&mut source, 100.0, 10.0)).collect();
        let result = normality_check(&values);
        assert!(result.w_statistic.is_finite());
        assert!(result.is_normal, "W statistic was {}", result.w_statistic);
    }

    #[test]
    fn test_t_test_identical_samples() {
        let values = [10.0, 12.0, 11.0, 13.0];
        let result = two_sample_t_test(&values, &values);
        assert_eq!(result.t_statistic, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-6);
        assert!(!result.significant);
    }

    #[test]
    fn test_t_test_clearly_shifted_samples() {
        let first: Vec<f64> = (0..10).map(|i| 10.0 + i as f64 * 0.1).collect();
        let second: Vec<f64> = (0..10).map(|i| 100.0 + i as f64 * 0.1).collect();
        let result = two_sample_t_test(&first, &second);
        assert!(result.t_statistic < 0.0);
        assert!(result.p_value < 0.001);
        assert!(result.significant);
    }

    #[test]
    fn test_t_test_degenerate_samples() {
        let result = two_sample_t_test(&[1.0], &[2.0, 3.0]);
        assert_eq!(result.t_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.significant);

        // Zero variance on both sides pools to zero.
        let result = two_sample_t_test(&[4.0, 4.0], &[4.0, 4.0]);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_erf_polynomial_accuracy() {
        assert!((erf_approx(1.0) - 0.842_700_79).abs() < 1e-4);
        assert!((erf_approx(-1.0) + 0.842_700_79).abs() < 1e-4);
        assert!((erf_approx(0.0)).abs() < 1e-6);
    }

    #[test]
    fn test_standard_normal_cdf_quantiles() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((standard_normal_cdf(-1.96) - 0.025).abs() < 1e-3);
    }
}
