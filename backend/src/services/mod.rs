//! Service layer for analytics and orchestration.
//!
//! Services are pure functions over generated metric records; the dashboard
//! and report modules assemble the payloads that callers serialize to JSON.
//! The `generate_*` entry points wire in default configuration and OS
//! entropy, the `compute_*` cores take everything explicitly.

pub mod dashboard;

pub mod departmental;

pub mod forecast;

pub mod kpi;

pub mod peak_hours;

pub mod report;

pub use dashboard::{
    compute_dashboard_data, compute_weekly_overview, generate_dashboard_data,
    generate_dashboard_data_cached, generate_weekly_overview,
};
pub use report::{
    compute_statistical_report, generate_statistical_report, generate_statistical_report_cached,
};
