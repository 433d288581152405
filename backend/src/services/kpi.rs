//! Headline KPI metrics over the per-day aggregate series.

use crate::api::types::{KpiMetrics, KpiStat};
use crate::models::metrics::DayAggregate;
use crate::services::forecast::smoothed_level;
use crate::stats::descriptive::{coefficient_of_variation, confidence_interval_95, ols_slope};

/// Interval estimate plus slope for one series.
fn kpi_stat(series: &[f64]) -> KpiStat {
    KpiStat {
        interval: confidence_interval_95(series),
        trend: ols_slope(series),
    }
}

/// Compute the dashboard's headline numbers.
///
/// An empty window yields all-zero statistics rather than an error; the
/// dashboard renders them as dashes.
pub fn compute_kpi_metrics(days: &[DayAggregate], smoothing_alpha: f64) -> KpiMetrics {
    let totals: Vec<f64> = days.iter().map(|d| d.total_appointments as f64).collect();
    let completion: Vec<f64> = days.iter().map(|d| d.completion_rate).collect();
    let waits: Vec<f64> = days.iter().map(|d| d.avg_wait_minutes).collect();
    let no_shows: Vec<f64> = days.iter().map(|d| d.no_show_rate).collect();

    KpiMetrics {
        total_appointments: kpi_stat(&totals),
        completion_rate: kpi_stat(&completion),
        wait_time: kpi_stat(&waits),
        no_show_rate: kpi_stat(&no_shows),
        volatility: coefficient_of_variation(&totals),
        wait_time_forecast: smoothed_level(&waits, smoothing_alpha),
    }
}
