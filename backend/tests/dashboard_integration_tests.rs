//! Integration tests for the dashboard and weekly-overview entry points.

use std::time::Duration;

use chrono::{DateTime, Datelike, TimeZone, Utc, Weekday};

use csi_rust::api::types::{DashboardData, Timeframe, TrendDirection};
use csi_rust::cache::TtlCache;
use csi_rust::config::EngineConfig;
use csi_rust::services::dashboard::{
    compute_dashboard_data, compute_weekly_overview, generate_dashboard_data,
    generate_dashboard_data_cached,
};
use csi_rust::sim::rng::SimRng;

fn fixed_now() -> DateTime<Utc> {
    // Wednesday, 2025-06-18, noon UTC.
    Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
}

fn seeded_dashboard(seed: u64, timeframe: Timeframe) -> DashboardData {
    let config = EngineConfig::default();
    let mut source = SimRng::seeded(seed);
    compute_dashboard_data(&config, &mut source, timeframe, fixed_now())
}

#[test]
fn dashboard_has_expected_shape() {
    let data = seeded_dashboard(42, Timeframe::Days7);

    assert_eq!(data.peak_hours.len(), 10);
    assert_eq!(data.peak_hours[0].hour, 8);
    assert_eq!(data.peak_hours[9].hour, 17);

    assert_eq!(data.departmental_load.len(), 6);
    let codes: Vec<&str> = data
        .departmental_load
        .iter()
        .map(|d| d.department_code.as_str())
        .collect();
    assert_eq!(codes, ["REG", "LIC", "TAX", "SOC", "IMM", "TRA"]);

    assert_eq!(data.weekly_trends.len(), 7);
    assert_eq!(data.real_time_metrics.departments.len(), 6);
}

#[test]
fn weekly_trends_run_monday_to_sunday_for_every_timeframe() {
    let expected = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for timeframe in [
        Timeframe::Hours24,
        Timeframe::Days7,
        Timeframe::Days30,
        Timeframe::Days90,
    ] {
        let data = seeded_dashboard(7, timeframe);
        let labels: Vec<&str> = data.weekly_trends.iter().map(|p| p.day.as_str()).collect();
        assert_eq!(labels, expected, "timeframe {timeframe:?}");

        // Labels match the underlying dates.
        for point in &data.weekly_trends {
            let weekday_index = point.date.weekday().num_days_from_monday() as usize;
            assert_eq!(point.day, expected[weekday_index]);
        }
    }
}

#[test]
fn dashboard_is_deterministic_for_a_seed() {
    let first = seeded_dashboard(1234, Timeframe::Days30);
    let second = seeded_dashboard(1234, Timeframe::Days30);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let other_seed = seeded_dashboard(4321, Timeframe::Days30);
    assert_ne!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&other_seed).unwrap()
    );
}

#[test]
fn dashboard_utilization_is_capped() {
    for seed in 0..5 {
        let data = seeded_dashboard(seed, Timeframe::Days30);
        for load in &data.departmental_load {
            assert!(
                load.avg_utilization <= 100.0,
                "{} utilization {}",
                load.department_code,
                load.avg_utilization
            );
            assert!(load.avg_utilization >= 0.0);
        }
    }
}

#[test]
fn single_day_window_reports_stable_trends() {
    let data = seeded_dashboard(42, Timeframe::Hours24);
    for load in &data.departmental_load {
        assert_eq!(load.efficiency_trend, TrendDirection::Stable);
        assert!(!load.significant_change);
    }
    // The weekly chart still shows a full week.
    assert_eq!(data.weekly_trends.len(), 7);
}

#[test]
fn dashboard_kpis_are_finite_and_plausible() {
    let data = seeded_dashboard(99, Timeframe::Days90);
    let kpis = &data.kpi_metrics;

    assert!(kpis.total_appointments.interval.mean > 0.0);
    assert!(kpis.total_appointments.interval.lower <= kpis.total_appointments.interval.mean);
    assert!(kpis.total_appointments.interval.upper >= kpis.total_appointments.interval.mean);
    assert!((0.0..=100.0).contains(&kpis.completion_rate.interval.mean));
    assert!((0.0..=25.0).contains(&kpis.no_show_rate.interval.mean));
    assert!(kpis.wait_time.interval.mean > 0.0);
    assert!(kpis.volatility > 0.0);
    assert!(kpis.wait_time_forecast > 0.0);
}

#[test]
fn dashboard_json_uses_camel_case_keys() {
    let data = seeded_dashboard(5, Timeframe::Days7);
    let value = serde_json::to_value(&data).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "departmentalLoad",
            "kpiMetrics",
            "peakHours",
            "realTimeMetrics",
            "weeklyTrends"
        ]
    );

    let kpis = object["kpiMetrics"].as_object().unwrap();
    assert!(kpis.contains_key("totalAppointments"));
    assert!(kpis.contains_key("waitTimeForecast"));
    assert!(kpis.contains_key("noShowRate"));

    let peak = value["peakHours"][0].as_object().unwrap();
    assert!(peak.contains_key("waitTime"));

    let load = value["departmentalLoad"][0].as_object().unwrap();
    assert!(load.contains_key("significantChange"));
    assert!(load.contains_key("avgUtilization"));
}

#[test]
fn generate_accepts_unknown_timeframe() {
    // Falls back to 7 days rather than failing.
    let data = generate_dashboard_data("everything");
    assert_eq!(data.peak_hours.len(), 10);
    assert_eq!(data.weekly_trends.len(), 7);
}

#[test]
fn cached_generation_reuses_the_payload() {
    let mut cache: TtlCache<String, DashboardData> = TtlCache::new(Duration::from_secs(60));

    let first = generate_dashboard_data_cached(&mut cache, "7days");
    let second = generate_dashboard_data_cached(&mut cache, "7days");
    assert_eq!(cache.len(), 1);
    // Same cached payload, down to the random draws.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    // An unknown token resolves to the same key as its fallback.
    let fallback = generate_dashboard_data_cached(&mut cache, "bogus");
    assert_eq!(cache.len(), 1);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&fallback).unwrap()
    );

    // A different timeframe gets its own entry.
    generate_dashboard_data_cached(&mut cache, "30days");
    assert_eq!(cache.len(), 2);
}

#[test]
fn weekly_overview_scales_with_timeframe() {
    let config = EngineConfig::default();

    let mut source = SimRng::seeded(21);
    let month = compute_weekly_overview(&config, &mut source, Timeframe::Days30, fixed_now());
    assert_eq!(month.len(), 4 * 6);

    let mut source = SimRng::seeded(21);
    let quarter = compute_weekly_overview(&config, &mut source, Timeframe::Days90, fixed_now());
    assert_eq!(quarter.len(), 12 * 6);

    for row in &quarter {
        assert_eq!(row.week_start.weekday(), Weekday::Mon);
        assert!(row.completed <= row.total_appointments);
    }
}

#[test]
fn real_time_snapshot_is_consistent() {
    let data = seeded_dashboard(8, Timeframe::Days7);
    let rt = &data.real_time_metrics;

    assert_eq!(rt.as_of, fixed_now());
    let waiting_sum: u32 = rt.departments.iter().map(|d| d.waiting).sum();
    assert_eq!(rt.total_waiting, waiting_sum);
    assert!(rt
        .departments
        .iter()
        .any(|d| d.department_code == rt.busiest_department));
    for department in &rt.departments {
        assert!(department.counters_open >= 1);
        assert!(department.estimated_wait_minutes >= 0.0);
    }
}
