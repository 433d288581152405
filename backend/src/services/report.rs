//! Statistical report assembly.
//!
//! The report works on per-day aggregates of the raw daily series (one
//! sample point per calendar day), so its sample size equals the window
//! length in days.

use chrono::{DateTime, Utc};

use crate::api::types::{
    PercentileBenchmarks, PerformanceBenchmarks, StatisticalReport, StatisticalSummary, Timeframe,
};
use crate::cache::TtlCache;
use crate::config::EngineConfig;
use crate::models::catalog::build_catalog;
use crate::models::metrics::{aggregate_by_day, DailyMetric, HourlyMetric};
use crate::services::forecast::seasonal_trend_forecast;
use crate::services::peak_hours::busiest_hour;
use crate::sim::rng::{SimRng, UniformSource};
use crate::sim::series;
use crate::stats::descriptive::{mean, ols_slope, percentile, quartiles, sorted_copy};
use crate::stats::inference::{
    autocorrelation, detect_seasonality, normality_check, two_sample_t_test,
};

/// Report for the given timeframe token, with OS-entropy randomness and
/// default configuration.
///
/// Unrecognized tokens, including `24hours`, fall back to 30 days.
pub fn generate_statistical_report(timeframe: &str) -> StatisticalReport {
    let config = EngineConfig::default();
    let mut source = SimRng::from_entropy();
    compute_statistical_report(
        &config,
        &mut source,
        Timeframe::parse_for_report(timeframe),
        Utc::now(),
    )
}

/// Cached wrapper around [`generate_statistical_report`], keyed by the
/// resolved timeframe token.
pub fn generate_statistical_report_cached(
    cache: &mut TtlCache<String, StatisticalReport>,
    timeframe: &str,
) -> StatisticalReport {
    let resolved = Timeframe::parse_for_report(timeframe);
    if let Some(hit) = cache.get(resolved.as_str()) {
        log::debug!("report cache hit for {}", resolved.as_str());
        return hit;
    }
    let report = generate_statistical_report(timeframe);
    cache.insert(resolved.as_str().to_string(), report.clone());
    report
}

/// Deterministic report core: explicit config, random source, and clock.
pub fn compute_statistical_report(
    config: &EngineConfig,
    source: &mut dyn UniformSource,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> StatisticalReport {
    let catalog = build_catalog(source);
    let today = now.date_naive();
    let days = timeframe.days();

    let daily =
        series::daily_metrics_raw(&config.simulation, source, &catalog.departments, today, days);
    let hourly =
        series::hourly_metrics(&config.simulation, source, &catalog.departments, today, days);
    let day_rows = aggregate_by_day(&daily);

    let totals: Vec<f64> = day_rows.iter().map(|d| d.total_appointments as f64).collect();
    let completion: Vec<f64> = day_rows.iter().map(|d| d.completion_rate).collect();
    let waits: Vec<f64> = day_rows.iter().map(|d| d.avg_wait_minutes).collect();
    let no_show_rates: Vec<f64> = day_rows.iter().map(|d| d.no_show_rate).collect();

    let (first_half, second_half) = completion.split_at(completion.len() / 2);
    let t_test = two_sample_t_test(first_half, second_half);

    let statistical_summary = StatisticalSummary {
        sample_size: day_rows.len(),
        normality_test: normality_check(&totals),
        autocorrelation: autocorrelation(&totals, 1),
        seasonality_detected: detect_seasonality(&totals),
        significant_trend_change: t_test.significant,
        data_quality_score: data_quality_score(&daily),
    };

    let performance_benchmarks = PerformanceBenchmarks {
        efficiency: percentile_benchmarks(&sorted_copy(&completion)),
        wait_time: percentile_benchmarks(&sorted_copy(&waits)),
    };

    StatisticalReport {
        statistical_summary,
        performance_benchmarks,
        forecast: seasonal_trend_forecast(&totals, config.forecast.horizon_days),
        recommendations: build_recommendations(
            config,
            &completion,
            &waits,
            &no_show_rates,
            &hourly,
        ),
    }
}

fn percentile_benchmarks(sorted: &[f64]) -> PercentileBenchmarks {
    PercentileBenchmarks {
        p25: percentile(sorted, 0.25),
        p50: percentile(sorted, 0.50),
        p75: percentile(sorted, 0.75),
        p90: percentile(sorted, 0.90),
    }
}

/// 0..=100 quality heuristic over the raw department-day rows.
///
/// Starts at 100 and subtracts weighted fractions: 20 for zero-activity
/// rows, 15 for totals outside the Tukey fences, 25 for internally
/// inconsistent rows. An empty window scores 0: no data, no trust.
pub fn data_quality_score(rows: &[DailyMetric]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let n = rows.len() as f64;

    let zero_rows = rows
        .iter()
        .filter(|r| r.total == 0 || r.completion_rate == 0.0)
        .count() as f64;

    let totals = sorted_copy(&rows.iter().map(|r| r.total as f64).collect::<Vec<_>>());
    let (q1, q3) = quartiles(&totals);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;
    let outliers = rows
        .iter()
        .filter(|r| {
            let t = r.total as f64;
            t < low_fence || t > high_fence
        })
        .count() as f64;

    let inconsistent = rows
        .iter()
        .filter(|r| {
            r.completed > r.total
                || r.no_shows > r.total
                || r.completion_rate < 0.0
                || r.completion_rate > 100.0
        })
        .count() as f64;

    let score = 100.0
        - (zero_rows / n) * 20.0
        - (outliers / n) * 15.0
        - (inconsistent / n) * 25.0;
    score.max(0.0)
}

fn build_recommendations(
    config: &EngineConfig,
    completion: &[f64],
    waits: &[f64],
    no_show_rates: &[f64],
    hourly: &[HourlyMetric],
) -> Vec<String> {
    let thresholds = &config.report;
    let mut recommendations = Vec::new();

    if ols_slope(completion) < thresholds.declining_trend_threshold {
        recommendations.push(
            "Completion rates are trending down. Review staffing allocation and \
             simplify intake workflows in the affected departments."
                .to_string(),
        );
    }
    if mean(waits) > thresholds.wait_alert_minutes {
        recommendations.push(format!(
            "Average wait time exceeds {:.0} minutes. Open additional counters \
             during peak demand windows.",
            thresholds.wait_alert_minutes
        ));
    }
    recommendations.push(format!(
        "Peak demand occurs around {}:00. Align staffing and counter openings \
         with this hour.",
        busiest_hour(hourly)
    ));
    if mean(no_show_rates) > thresholds.no_show_alert_pct {
        recommendations.push(format!(
            "No-show rate is above {:.0}%. Send appointment reminders and \
             consider moderate overbooking.",
            thresholds.no_show_alert_pct
        ));
    }

    recommendations
}
