//! DTOs returned by the dashboard, report, and weekly-overview operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::catalog::DepartmentId;
use crate::stats::descriptive::ConfidenceInterval;
use crate::stats::inference::NormalityResult;

// ============================================================================
// Timeframe selection
// ============================================================================

/// Reporting window selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "24hours")]
    Hours24,
    #[serde(rename = "7days")]
    Days7,
    #[serde(rename = "30days")]
    Days30,
    #[serde(rename = "90days")]
    Days90,
}

impl Timeframe {
    pub const DASHBOARD_DEFAULT: Timeframe = Timeframe::Days7;
    pub const REPORT_DEFAULT: Timeframe = Timeframe::Days30;

    /// Parse a caller token; anything unrecognized maps to `fallback`.
    pub fn parse_or(token: &str, fallback: Timeframe) -> Timeframe {
        match token {
            "24hours" => Timeframe::Hours24,
            "7days" => Timeframe::Days7,
            "30days" => Timeframe::Days30,
            "90days" => Timeframe::Days90,
            _ => fallback,
        }
    }

    /// Report parsing. The report never covers a single day, so `24hours`
    /// falls back with everything else.
    pub fn parse_for_report(token: &str) -> Timeframe {
        match token {
            "7days" => Timeframe::Days7,
            "30days" => Timeframe::Days30,
            "90days" => Timeframe::Days90,
            _ => Timeframe::REPORT_DEFAULT,
        }
    }

    /// Window length in days.
    pub fn days(self) -> u32 {
        match self {
            Timeframe::Hours24 => 1,
            Timeframe::Days7 => 7,
            Timeframe::Days30 => 30,
            Timeframe::Days90 => 90,
        }
    }

    /// The caller-facing token, also used as cache key.
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Hours24 => "24hours",
            Timeframe::Days7 => "7days",
            Timeframe::Days30 => "30days",
            Timeframe::Days90 => "90days",
        }
    }
}

/// Direction of a fitted trend, with a dead band around zero slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

// ============================================================================
// Dashboard payload (camelCase)
// ============================================================================

/// Load profile for one business hour across the sampled window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHourPoint {
    pub hour: u32,
    pub scheduled: ConfidenceInterval,
    pub wait_time: ConfidenceInterval,
    /// Exponentially smoothed scheduled volume.
    pub trend: f64,
}

/// Aggregated load and efficiency for one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentalLoad {
    pub department_id: DepartmentId,
    pub department_code: String,
    pub department_name: String,
    pub appointments: ConfidenceInterval,
    pub completion_rate: ConfidenceInterval,
    pub efficiency_trend: TrendDirection,
    /// First-half versus second-half t-test outcome.
    pub significant_change: bool,
    pub avg_utilization: f64,
}

/// One weekday on the dashboard's weekly chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrendPoint {
    pub day: String,
    pub date: NaiveDate,
    pub appointments: u32,
    pub completed: u32,
    pub no_shows: u32,
    pub completion_rate: f64,
}

/// Headline statistic: interval estimate plus fitted slope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiStat {
    pub interval: ConfidenceInterval,
    pub trend: f64,
}

/// Headline KPIs over the selected window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetrics {
    pub total_appointments: KpiStat,
    pub completion_rate: KpiStat,
    pub wait_time: KpiStat,
    pub no_show_rate: KpiStat,
    /// Coefficient of variation of daily totals.
    pub volatility: f64,
    pub wait_time_forecast: f64,
}

/// Live queue state for one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStatus {
    pub department_id: DepartmentId,
    pub department_code: String,
    pub waiting: u32,
    pub estimated_wait_minutes: f64,
    pub counters_open: u32,
    pub served_today: u32,
}

/// Snapshot of current center load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeMetrics {
    pub as_of: DateTime<Utc>,
    pub total_waiting: u32,
    pub avg_wait_minutes: f64,
    pub busiest_department: String,
    pub departments: Vec<DepartmentStatus>,
}

/// Complete dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub peak_hours: Vec<PeakHourPoint>,
    pub departmental_load: Vec<DepartmentalLoad>,
    pub weekly_trends: Vec<WeeklyTrendPoint>,
    pub kpi_metrics: KpiMetrics,
    pub real_time_metrics: RealTimeMetrics,
}

// ============================================================================
// Statistical report payload (snake_case)
// ============================================================================

/// Distributional summary of the per-day series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub sample_size: usize,
    pub normality_test: NormalityResult,
    /// Lag-1 autocorrelation of daily totals.
    pub autocorrelation: f64,
    pub seasonality_detected: bool,
    pub significant_trend_change: bool,
    /// 0..=100 heuristic, see `services::report`.
    pub data_quality_score: f64,
}

/// Percentile spread of a per-day series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileBenchmarks {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// Benchmark groups reported to administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceBenchmarks {
    /// Daily completion rate, percent.
    pub efficiency: PercentileBenchmarks,
    /// Daily average wait, minutes.
    pub wait_time: PercentileBenchmarks,
}

/// Complete statistical report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticalReport {
    pub statistical_summary: StatisticalSummary,
    pub performance_benchmarks: PerformanceBenchmarks,
    /// Appointment totals for the coming days.
    pub forecast: Vec<u32>,
    pub recommendations: Vec<String>,
}
