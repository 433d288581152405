//! Peak-hour load profiles from hourly metrics.

use crate::api::types::PeakHourPoint;
use crate::models::metrics::HourlyMetric;
use crate::services::forecast::smoothed_level;
use crate::sim::series::{CLOSING_HOUR, OPENING_HOUR};
use crate::stats::descriptive::{confidence_interval_95, mean};

/// Profile each business hour across all sampled days and departments.
///
/// Always returns one point per business hour, even with no rows; the
/// intervals then degenerate to zero.
pub fn compute_peak_hours(rows: &[HourlyMetric], smoothing_alpha: f64) -> Vec<PeakHourPoint> {
    (OPENING_HOUR..=CLOSING_HOUR)
        .map(|hour| {
            let scheduled: Vec<f64> = rows
                .iter()
                .filter(|r| r.hour == hour)
                .map(|r| r.scheduled as f64)
                .collect();
            let waits: Vec<f64> = rows
                .iter()
                .filter(|r| r.hour == hour)
                .map(|r| r.avg_wait_minutes)
                .collect();
            PeakHourPoint {
                hour,
                scheduled: confidence_interval_95(&scheduled),
                wait_time: confidence_interval_95(&waits),
                trend: smoothed_level(&scheduled, smoothing_alpha),
            }
        })
        .collect()
}

/// Busiest business hour by mean scheduled volume.
///
/// Defaults to opening when no rows exist.
pub fn busiest_hour(rows: &[HourlyMetric]) -> u32 {
    (OPENING_HOUR..=CLOSING_HOUR)
        .map(|hour| {
            let scheduled: Vec<f64> = rows
                .iter()
                .filter(|r| r.hour == hour)
                .map(|r| r.scheduled as f64)
                .collect();
            (hour, mean(&scheduled))
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(hour, _)| hour)
        .unwrap_or(OPENING_HOUR)
}
