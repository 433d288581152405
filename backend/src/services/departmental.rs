//! Departmental load summaries.

use crate::api::types::{DepartmentalLoad, TrendDirection};
use crate::models::catalog::Department;
use crate::models::metrics::DailyMetric;
use crate::stats::descriptive::{confidence_interval_95, mean, ols_slope};
use crate::stats::inference::two_sample_t_test;

/// Dead band below which a completion-rate slope counts as stable.
const TREND_EPSILON: f64 = 0.01;

/// Summarize load and efficiency per department over the daily window.
///
/// Departments with no rows still get an entry with degenerate intervals and
/// a stable trend, so the dashboard's department list never shrinks.
pub fn compute_departmental_load(
    departments: &[Department],
    daily: &[DailyMetric],
) -> Vec<DepartmentalLoad> {
    departments
        .iter()
        .map(|department| {
            let mut rows: Vec<&DailyMetric> = daily
                .iter()
                .filter(|r| r.department_id == department.id)
                .collect();
            rows.sort_by_key(|r| r.date);

            let appointments: Vec<f64> = rows.iter().map(|r| r.total as f64).collect();
            let completion: Vec<f64> = rows.iter().map(|r| r.completion_rate).collect();
            let utilization: Vec<f64> =
                rows.iter().map(|r| r.capacity_utilization).collect();

            let slope = ols_slope(&completion);
            let efficiency_trend = if slope > TREND_EPSILON {
                TrendDirection::Improving
            } else if slope < -TREND_EPSILON {
                TrendDirection::Declining
            } else {
                TrendDirection::Stable
            };

            let (first_half, second_half) = completion.split_at(completion.len() / 2);
            let t_test = two_sample_t_test(first_half, second_half);

            DepartmentalLoad {
                department_id: department.id,
                department_code: department.code.clone(),
                department_name: department.name.clone(),
                appointments: confidence_interval_95(&appointments),
                completion_rate: confidence_interval_95(&completion),
                efficiency_trend,
                significant_change: t_test.significant,
                avg_utilization: mean(&utilization),
            }
        })
        .collect()
}
