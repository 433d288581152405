//! # CSI Rust Backend
//!
//! High-performance citizen-services analytics engine.
//!
//! This crate provides the statistical core of the Citizen Services Insights
//! (CSI) portal: synthetic operational data for government service centers
//! and the aggregated analytics the administrative dashboards render. The
//! portal's HTTP layer calls the entry points in [`services`] and serializes
//! the returned DTOs straight to JSON.
//!
//! ## Features
//!
//! - **Variate Generation**: normal, Poisson, gamma and beta samplers over
//!   an injectable uniform source
//! - **Synthetic Series**: hourly, daily and weekly operational metrics
//!   driven by fixed demand and seasonality tables
//! - **Aggregation**: peak-hour profiles, departmental load, weekly trends,
//!   headline KPIs with confidence intervals
//! - **Statistical Tests**: autocorrelation, seasonality detection, a
//!   simplified normality check, two-sample t-test
//! - **Forecasting**: exponential smoothing and a seasonal-naive trend model
//! - **Reporting**: percentile benchmarks, data-quality scoring, and
//!   threshold-driven recommendations
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for the dashboard and report
//! - [`models`]: department catalog and metric record types
//! - [`sim`]: uniform source, variate generators, series builders
//! - [`stats`]: descriptive and inferential statistics helpers
//! - [`services`]: aggregation, forecasting, and the public entry points
//! - [`config`]: TOML-backed engine tuning
//! - [`cache`]: caller-owned TTL cache for computed payloads
//!
//! ## Determinism
//!
//! Every `compute_*` core takes a `&mut dyn UniformSource` and an explicit
//! clock reading. A seeded [`sim::SimRng`] therefore reproduces complete
//! payloads bit for bit, which the integration tests rely on.

pub mod api;

pub mod cache;
pub mod config;
pub mod models;

pub mod services;

pub mod sim;
pub mod stats;
