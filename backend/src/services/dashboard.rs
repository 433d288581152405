//! Dashboard data assembly and the real-time operations snapshot.

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::api::types::{
    DashboardData, DepartmentStatus, RealTimeMetrics, Timeframe, WeeklyTrendPoint,
};
use crate::cache::TtlCache;
use crate::config::EngineConfig;
use crate::models::catalog::{build_catalog, Department};
use crate::models::metrics::{aggregate_by_day, weekday_label, DayAggregate, WeeklyTrend};
use crate::services::{departmental, kpi, peak_hours};
use crate::sim::rng::{uniform_int, SimRng, UniformSource};
use crate::sim::series;
use crate::sim::variates::{normal, poisson};
use crate::stats::descriptive::mean;

/// Live-snapshot distribution parameters.
const REALTIME_QUEUE_LAMBDA: f64 = 3.0;
const REALTIME_WAIT_MEAN: f64 = 28.0;
const REALTIME_WAIT_STD: f64 = 10.0;
const REALTIME_SERVED_LAMBDA: f64 = 45.0;

/// Dashboard payload for the given timeframe token, with OS-entropy
/// randomness and default configuration.
///
/// Unrecognized tokens fall back to 7 days.
pub fn generate_dashboard_data(timeframe: &str) -> DashboardData {
    let config = EngineConfig::default();
    let mut source = SimRng::from_entropy();
    compute_dashboard_data(
        &config,
        &mut source,
        Timeframe::parse_or(timeframe, Timeframe::DASHBOARD_DEFAULT),
        Utc::now(),
    )
}

/// Cached wrapper around [`generate_dashboard_data`], keyed by the resolved
/// timeframe token.
pub fn generate_dashboard_data_cached(
    cache: &mut TtlCache<String, DashboardData>,
    timeframe: &str,
) -> DashboardData {
    let resolved = Timeframe::parse_or(timeframe, Timeframe::DASHBOARD_DEFAULT);
    if let Some(hit) = cache.get(resolved.as_str()) {
        log::debug!("dashboard cache hit for {}", resolved.as_str());
        return hit;
    }
    let data = generate_dashboard_data(timeframe);
    cache.insert(resolved.as_str().to_string(), data.clone());
    data
}

/// Deterministic dashboard core: explicit config, random source, and clock.
pub fn compute_dashboard_data(
    config: &EngineConfig,
    source: &mut dyn UniformSource,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> DashboardData {
    let catalog = build_catalog(source);
    let today = now.date_naive();
    let days = timeframe.days();

    let hourly =
        series::hourly_metrics(&config.simulation, source, &catalog.departments, today, days);
    // At least a full week of dailies so the weekly chart never shows gaps,
    // even on the 24-hour view.
    let span = days.max(7);
    let daily =
        series::daily_metrics(&config.simulation, source, &catalog.departments, today, span);

    // Everything except the weekly chart is computed over the requested
    // window only.
    let window_start = today - Duration::days(days as i64 - 1);
    let window: Vec<_> = daily
        .iter()
        .filter(|r| r.date >= window_start)
        .cloned()
        .collect();

    let day_rows = aggregate_by_day(&daily);
    let window_days = aggregate_by_day(&window);

    DashboardData {
        peak_hours: peak_hours::compute_peak_hours(&hourly, config.forecast.smoothing_alpha),
        departmental_load: departmental::compute_departmental_load(
            &catalog.departments,
            &window,
        ),
        weekly_trends: weekly_trend_points(&day_rows),
        kpi_metrics: kpi::compute_kpi_metrics(&window_days, config.forecast.smoothing_alpha),
        real_time_metrics: real_time_snapshot(&catalog.departments, source, now),
    }
}

/// Last seven day-aggregates arranged Monday first.
///
/// The chart renders a fixed Mon..Sun axis, so the trailing week is
/// reordered by weekday rather than by date.
fn weekly_trend_points(day_rows: &[DayAggregate]) -> Vec<WeeklyTrendPoint> {
    let tail_start = day_rows.len().saturating_sub(7);
    let mut points: Vec<WeeklyTrendPoint> = day_rows[tail_start..]
        .iter()
        .map(|day| WeeklyTrendPoint {
            day: weekday_label(day.date.weekday()).to_string(),
            date: day.date,
            appointments: day.total_appointments,
            completed: day.completed,
            no_shows: day.no_shows,
            completion_rate: day.completion_rate,
        })
        .collect();
    points.sort_by_key(|p| p.date.weekday().num_days_from_monday());
    points
}

/// Live snapshot of current center load.
pub fn real_time_snapshot(
    departments: &[Department],
    source: &mut dyn UniformSource,
    as_of: DateTime<Utc>,
) -> RealTimeMetrics {
    let statuses: Vec<DepartmentStatus> = departments
        .iter()
        .map(|department| {
            let max_counters = (department.staff_count / 4).max(2);
            DepartmentStatus {
                department_id: department.id,
                department_code: department.code.clone(),
                waiting: poisson(source, REALTIME_QUEUE_LAMBDA),
                estimated_wait_minutes: normal(source, REALTIME_WAIT_MEAN, REALTIME_WAIT_STD),
                counters_open: uniform_int(source, 1, max_counters),
                served_today: poisson(source, REALTIME_SERVED_LAMBDA),
            }
        })
        .collect();

    let total_waiting = statuses.iter().map(|s| s.waiting).sum();
    let waits: Vec<f64> = statuses.iter().map(|s| s.estimated_wait_minutes).collect();
    let busiest_department = statuses
        .iter()
        .max_by_key(|s| s.waiting)
        .map(|s| s.department_code.clone())
        .unwrap_or_default();

    RealTimeMetrics {
        as_of,
        total_waiting,
        avg_wait_minutes: mean(&waits),
        busiest_department,
        departments: statuses,
    }
}

/// Weekly overview rows for the admin view, with OS-entropy randomness and
/// default configuration.
pub fn generate_weekly_overview(timeframe: &str) -> Vec<WeeklyTrend> {
    let config = EngineConfig::default();
    let mut source = SimRng::from_entropy();
    compute_weekly_overview(
        &config,
        &mut source,
        Timeframe::parse_or(timeframe, Timeframe::DASHBOARD_DEFAULT),
        Utc::now(),
    )
}

/// Deterministic weekly overview core.
///
/// Covers one week per full seven days of the timeframe, with a one-week
/// minimum.
pub fn compute_weekly_overview(
    config: &EngineConfig,
    source: &mut dyn UniformSource,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<WeeklyTrend> {
    let catalog = build_catalog(source);
    let weeks = (timeframe.days() / 7).max(1);
    series::weekly_trends(
        &config.simulation,
        source,
        &catalog.departments,
        now.date_naive(),
        weeks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::DepartmentId;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        // A Wednesday at noon.
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    fn aggregate(date: NaiveDate, total: u32) -> DayAggregate {
        DayAggregate {
            date,
            total_appointments: total,
            completed: total * 8 / 10,
            no_shows: total / 20,
            completion_rate: 80.0,
            avg_wait_minutes: 21.0,
            no_show_rate: 5.0,
        }
    }

    #[test]
    fn test_weekly_trend_points_reorder_monday_first() {
        // Seven consecutive days starting Thursday 2025-06-12.
        let start = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();
        let day_rows: Vec<DayAggregate> = (0..7)
            .map(|i| aggregate(start + Duration::days(i), 100 + i as u32))
            .collect();
        let points = weekly_trend_points(&day_rows);

        let labels: Vec<&str> = points.iter().map(|p| p.day.as_str()).collect();
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        // Thursday was the first generated day.
        assert_eq!(points[3].appointments, 100);
        assert_eq!(points[3].date, start);
    }

    #[test]
    fn test_weekly_trend_points_take_trailing_week() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let day_rows: Vec<DayAggregate> = (0..14)
            .map(|i| aggregate(start + Duration::days(i), i as u32))
            .collect();
        let points = weekly_trend_points(&day_rows);

        assert_eq!(points.len(), 7);
        // Only the second week survives.
        assert!(points.iter().all(|p| p.appointments >= 7));
    }

    #[test]
    fn test_real_time_snapshot_shape() {
        let departments = vec![
            Department {
                id: DepartmentId(1),
                code: "REG".to_string(),
                name: "Civil Registry".to_string(),
                staff_count: 20,
                daily_capacity: 100,
                target_wait_minutes: 30,
            },
            Department {
                id: DepartmentId(2),
                code: "TAX".to_string(),
                name: "Revenue & Taxation".to_string(),
                staff_count: 4,
                daily_capacity: 80,
                target_wait_minutes: 30,
            },
        ];
        let mut source = SimRng::seeded(42);
        let snapshot = real_time_snapshot(&departments, &mut source, fixed_now());

        assert_eq!(snapshot.as_of, fixed_now());
        assert_eq!(snapshot.departments.len(), 2);
        let waiting_sum: u32 = snapshot.departments.iter().map(|s| s.waiting).sum();
        assert_eq!(snapshot.total_waiting, waiting_sum);
        assert!(snapshot
            .departments
            .iter()
            .any(|s| s.department_code == snapshot.busiest_department));
        for status in &snapshot.departments {
            // staff 20 allows up to 5 counters; staff 4 still allows 2.
            let cap = (status.department_code == "REG") as u32 * 3 + 2;
            assert!((1..=cap).contains(&status.counters_open));
        }
    }

    #[test]
    fn test_real_time_counters_respect_staffing_floor() {
        let department = Department {
            id: DepartmentId(1),
            code: "SOC".to_string(),
            name: "Social Services".to_string(),
            staff_count: 5,
            daily_capacity: 90,
            target_wait_minutes: 30,
        };
        for seed in 0..30 {
            let mut source = SimRng::seeded(seed);
            let snapshot = real_time_snapshot(std::slice::from_ref(&department), &mut source, fixed_now());
            // staff/4 rounds to 1, floored to a minimum of 2 counters.
            assert!((1..=2).contains(&snapshot.departments[0].counters_open));
        }
    }

    #[test]
    fn test_compute_weekly_overview_week_counts() {
        let config = EngineConfig::default();
        for (timeframe, expected_weeks) in [
            (Timeframe::Hours24, 1usize),
            (Timeframe::Days7, 1),
            (Timeframe::Days30, 4),
            (Timeframe::Days90, 12),
        ] {
            let mut source = SimRng::seeded(9);
            let rows = compute_weekly_overview(&config, &mut source, timeframe, fixed_now());
            assert_eq!(rows.len(), expected_weeks * 6, "timeframe {timeframe:?}");
        }
    }
}
