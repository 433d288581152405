//! Operational metric records produced by the synthetic series generators.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::catalog::DepartmentId;

/// One department-hour of operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyMetric {
    pub date: NaiveDate,
    /// Business hour, 8..=17.
    pub hour: u32,
    pub department_id: DepartmentId,
    pub scheduled: u32,
    pub completed: u32,
    pub avg_wait_minutes: f64,
    pub max_queue_length: u32,
}

/// One department-day of operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub department_id: DepartmentId,
    pub total: u32,
    pub completed: u32,
    pub no_shows: u32,
    pub avg_wait_minutes: f64,
    /// Percentage, 0..=100.
    pub completion_rate: f64,
    /// Percentage, 0..=25.
    pub no_show_rate: f64,
    /// Percentage. Whether values above 100 are possible depends on the
    /// generating path, see `sim::series`.
    pub capacity_utilization: f64,
}

/// One department-week summary.
///
/// Per-weekday counts are sampled independently of `total_appointments` and
/// do not reconcile with it; consumers must treat the breakdown as
/// approximate shares, not an exact partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTrend {
    /// Monday of the summarized week.
    pub week_start: NaiveDate,
    pub department_id: DepartmentId,
    pub total_appointments: u32,
    pub completed: u32,
    pub no_shows: u32,
    /// Monday-first counts.
    pub by_weekday: [u32; 7],
    pub avg_completion_rate: f64,
    pub peak_weekday: String,
}

/// Daily metrics reduced across departments for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub total_appointments: u32,
    pub completed: u32,
    pub no_shows: u32,
    pub completion_rate: f64,
    pub avg_wait_minutes: f64,
    pub no_show_rate: f64,
}

/// Short weekday label, Monday first.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Reduce department-day rows into one row per date, ordered by date.
///
/// Counts are summed; rates and waits are averaged across departments.
pub fn aggregate_by_day(rows: &[DailyMetric]) -> Vec<DayAggregate> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&DailyMetric>> = BTreeMap::new();
    for row in rows {
        by_date.entry(row.date).or_default().push(row);
    }

    by_date
        .into_iter()
        .map(|(date, group)| {
            let count = group.len() as f64;
            DayAggregate {
                date,
                total_appointments: group.iter().map(|r| r.total).sum(),
                completed: group.iter().map(|r| r.completed).sum(),
                no_shows: group.iter().map(|r| r.no_shows).sum(),
                completion_rate: group.iter().map(|r| r.completion_rate).sum::<f64>() / count,
                avg_wait_minutes: group.iter().map(|r| r.avg_wait_minutes).sum::<f64>() / count,
                no_show_rate: group.iter().map(|r| r.no_show_rate).sum::<f64>() / count,
            }
        })
        .collect()
}
