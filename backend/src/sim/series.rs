//! Synthetic operational time series.
//!
//! Arrival volumes follow a Poisson base modulated by fixed hourly-demand
//! and weekly-seasonality tables; waits, completions and no-shows come from
//! the variate generators. Rows cover the trailing window ending at the
//! given date, oldest first.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::config::SimulationConfig;
use crate::models::catalog::Department;
use crate::models::metrics::{weekday_label, DailyMetric, HourlyMetric, WeeklyTrend};
use crate::sim::rng::{uniform_int, UniformSource};
use crate::sim::variates::{beta, gamma, normal, poisson};

/// First and last business hours, inclusive.
pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 17;

/// Demand multiplier per business hour 8..=17: morning ramp, lunch dip,
/// afternoon peak.
const HOURLY_DEMAND: [f64; 10] = [0.6, 0.9, 1.2, 1.4, 1.1, 0.7, 0.9, 1.3, 1.2, 0.8];

/// Demand multiplier per weekday, Monday first. Weekends run skeleton
/// service.
const WEEKLY_SEASONALITY: [f64; 7] = [1.25, 1.15, 1.05, 1.10, 0.95, 0.45, 0.20];

/// Nominal share of weekly volume per weekday, Monday first.
const WEEKDAY_SHARES: [f64; 7] = [0.18, 0.20, 0.22, 0.24, 0.12, 0.03, 0.01];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekly_coefficient(date: NaiveDate) -> f64 {
    WEEKLY_SEASONALITY[date.weekday().num_days_from_monday() as usize]
}

/// Hourly metrics for each department over the trailing `days` ending at
/// `end_date`, business hours only.
pub fn hourly_metrics(
    cfg: &SimulationConfig,
    source: &mut dyn UniformSource,
    departments: &[Department],
    end_date: NaiveDate,
    days: u32,
) -> Vec<HourlyMetric> {
    let mut rows =
        Vec::with_capacity(days as usize * departments.len() * HOURLY_DEMAND.len());
    for offset in (0..days).rev() {
        let date = end_date - Duration::days(offset as i64);
        let weekly = weekly_coefficient(date);
        for department in departments {
            for hour in OPENING_HOUR..=CLOSING_HOUR {
                let base = poisson(source, cfg.base_arrival_rate) as f64;
                let demand = HOURLY_DEMAND[(hour - OPENING_HOUR) as usize];
                let scheduled =
                    (base * demand * weekly * cfg.demand_amplification).floor() as u32;
                let avg_wait = normal(source, cfg.wait_mean_minutes, cfg.wait_std_minutes);
                let fraction =
                    beta(source, cfg.hourly_completion_alpha, cfg.hourly_completion_beta);
                let completed = (scheduled as f64 * fraction).floor() as u32;
                let max_queue = (avg_wait / 5.0).floor() as u32 + poisson(source, 2.0);
                rows.push(HourlyMetric {
                    date,
                    hour,
                    department_id: department.id,
                    scheduled,
                    completed,
                    avg_wait_minutes: avg_wait,
                    max_queue_length: max_queue,
                });
            }
        }
    }
    log::debug!("generated {} hourly rows over {} days", rows.len(), days);
    rows
}

/// Daily metrics with capacity utilization capped at 100.
///
/// The dashboard consumers render utilization as a bounded percentage.
pub fn daily_metrics(
    cfg: &SimulationConfig,
    source: &mut dyn UniformSource,
    departments: &[Department],
    end_date: NaiveDate,
    days: u32,
) -> Vec<DailyMetric> {
    build_daily(cfg, source, departments, end_date, days, true)
}

/// Daily metrics with the raw utilization value, which exceeds 100 when a
/// department runs over capacity with long waits.
///
/// TODO: decide with the portal team whether the report should cap like the
/// dashboard does; both behaviors ship until then.
pub fn daily_metrics_raw(
    cfg: &SimulationConfig,
    source: &mut dyn UniformSource,
    departments: &[Department],
    end_date: NaiveDate,
    days: u32,
) -> Vec<DailyMetric> {
    build_daily(cfg, source, departments, end_date, days, false)
}

fn build_daily(
    cfg: &SimulationConfig,
    source: &mut dyn UniformSource,
    departments: &[Department],
    end_date: NaiveDate,
    days: u32,
    cap_utilization: bool,
) -> Vec<DailyMetric> {
    let mut rows = Vec::with_capacity(days as usize * departments.len());
    for offset in (0..days).rev() {
        let date = end_date - Duration::days(offset as i64);
        let weekly = weekly_coefficient(date);
        for department in departments {
            let total = (gamma(source, cfg.daily_total_shape, cfg.daily_total_scale) * weekly)
                .floor() as u32;
            let completion_rate =
                beta(source, cfg.daily_completion_alpha, cfg.daily_completion_beta) * 100.0;
            let no_show_rate = (-source.next_uniform().ln() * cfg.no_show_scale)
                .min(cfg.no_show_cap)
                * 100.0;
            let avg_wait =
                normal(source, cfg.wait_median_minutes.ln(), cfg.wait_log_sigma).exp();
            let completed = (total as f64 * completion_rate / 100.0).floor() as u32;
            let no_shows = (total as f64 * no_show_rate / 100.0).floor() as u32;
            let mut utilization = (total as f64 / department.daily_capacity as f64)
                * 100.0
                * (1.0 + avg_wait / 100.0);
            if cap_utilization {
                utilization = utilization.min(100.0);
            }
            rows.push(DailyMetric {
                date,
                department_id: department.id,
                total,
                completed,
                no_shows,
                avg_wait_minutes: avg_wait,
                completion_rate,
                no_show_rate,
                capacity_utilization: utilization,
            });
        }
    }
    rows
}

/// Week-level summary rows per department, oldest week first.
///
/// Each week runs Monday to Sunday; the most recent row covers the week
/// containing `end_date`. Weekday counts come from a jittered share template
/// drawn independently of the weekly total.
pub fn weekly_trends(
    cfg: &SimulationConfig,
    source: &mut dyn UniformSource,
    departments: &[Department],
    end_date: NaiveDate,
    weeks: u32,
) -> Vec<WeeklyTrend> {
    let monday = end_date - Duration::days(end_date.weekday().num_days_from_monday() as i64);
    let mut rows = Vec::with_capacity(weeks as usize * departments.len());
    for offset in (0..weeks).rev() {
        let week_start = monday - Duration::weeks(offset as i64);
        for department in departments {
            let total = uniform_int(source, cfg.weekly_total_min, cfg.weekly_total_max);

            let mut shares = [0.0f64; 7];
            let mut by_weekday = [0u32; 7];
            for day in 0..7 {
                let jitter =
                    1.0 + (source.next_uniform() * 2.0 - 1.0) * cfg.weekly_share_jitter;
                shares[day] = WEEKDAY_SHARES[day] * jitter;
                by_weekday[day] = (total as f64 * shares[day]).floor() as u32;
            }
            let peak_index = shares
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(i, _)| i)
                .unwrap_or(0);

            let completed = (total as f64
                * beta(source, cfg.daily_completion_alpha, cfg.daily_completion_beta))
            .floor() as u32;
            let no_shows = (total as f64
                * (-source.next_uniform().ln() * cfg.no_show_scale).min(cfg.no_show_cap))
            .floor() as u32;
            let avg_completion_rate = if total > 0 {
                completed as f64 / total as f64 * 100.0
            } else {
                0.0
            };

            rows.push(WeeklyTrend {
                week_start,
                department_id: department.id,
                total_appointments: total,
                completed,
                no_shows,
                by_weekday,
                avg_completion_rate,
                peak_weekday: weekday_label(WEEKDAYS[peak_index]).to_string(),
            });
        }
    }
    rows
}
