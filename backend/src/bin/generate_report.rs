//! Command-line generator emitting engine payloads as JSON.
//!
//! Usage:
//!   generate-report [dashboard|report|weekly] [timeframe] [--seed N] [--pretty]
//!
//! The optional `CSI_CONFIG` environment variable points at a TOML config
//! file; without it the default search locations are tried, then built-in
//! defaults. JSON goes to stdout, progress to stderr.

use std::env;

use anyhow::{Context, Result};
use chrono::Utc;

use csi_rust::api::types::Timeframe;
use csi_rust::config::EngineConfig;
use csi_rust::services::{dashboard, report};
use csi_rust::sim::rng::SimRng;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mode = args.get(1).map(String::as_str).unwrap_or("dashboard");
    let timeframe_token = args.get(2).map(String::as_str).unwrap_or("");

    let mut seed: Option<u64> = None;
    let mut pretty = false;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                let value = args.get(i + 1).context("--seed requires a value")?;
                seed = Some(value.parse().context("--seed value must be an integer")?);
                i += 2;
            }
            "--pretty" => {
                pretty = true;
                i += 1;
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let config = load_config()?;
    let mut source = match seed {
        Some(s) => SimRng::seeded(s),
        None => SimRng::from_entropy(),
    };
    let now = Utc::now();

    eprintln!("Generating {mode} payload...");

    let json = match mode {
        "dashboard" => {
            let timeframe = Timeframe::parse_or(timeframe_token, Timeframe::DASHBOARD_DEFAULT);
            let data = dashboard::compute_dashboard_data(&config, &mut source, timeframe, now);
            to_json(&data, pretty)?
        }
        "report" => {
            let timeframe = Timeframe::parse_for_report(timeframe_token);
            let data = report::compute_statistical_report(&config, &mut source, timeframe, now);
            to_json(&data, pretty)?
        }
        "weekly" => {
            let timeframe = Timeframe::parse_or(timeframe_token, Timeframe::DASHBOARD_DEFAULT);
            let rows = dashboard::compute_weekly_overview(&config, &mut source, timeframe, now);
            to_json(&rows, pretty)?
        }
        other => anyhow::bail!("unknown mode '{other}'; expected dashboard, report, or weekly"),
    };

    println!("{json}");
    eprintln!("✓ Done");
    Ok(())
}

fn load_config() -> Result<EngineConfig> {
    match env::var("CSI_CONFIG") {
        Ok(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {path}")),
        Err(_) => Ok(EngineConfig::from_default_location().unwrap_or_default()),
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
