//! # Statistics Module
//!
//! Descriptive and inferential statistics shared by the aggregation and
//! reporting services. All helpers are total functions: degenerate inputs
//! (empty series, zero variance, tiny samples) return documented neutral
//! values instead of NaN or panics.

pub mod descriptive;
pub mod inference;

pub use descriptive::{
    coefficient_of_variation, confidence_interval_95, mean, ols_slope, percentile,
    ConfidenceInterval,
};
pub use inference::{
    autocorrelation, detect_seasonality, normality_check, two_sample_t_test, NormalityResult,
    TTestResult,
};
