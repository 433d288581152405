//! Engine configuration loaded from TOML.
//!
//! Every tuning knob of the simulation and the analytics lives here with a
//! serde default, so an empty file (or no file at all) yields the stock
//! engine. The department and service tables are deliberately not
//! configurable; the portal's charts assume their shape.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration error type.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ============================================================================
// Simulation
// ============================================================================

/// Tuning for the synthetic series generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Poisson rate for the hourly arrival base.
    #[serde(default = "default_base_arrival_rate")]
    pub base_arrival_rate: f64,

    /// Scale applied after the demand and seasonality multipliers.
    #[serde(default = "default_demand_amplification")]
    pub demand_amplification: f64,

    /// Hourly wait distribution, minutes.
    #[serde(default = "default_wait_mean_minutes")]
    pub wait_mean_minutes: f64,
    #[serde(default = "default_wait_std_minutes")]
    pub wait_std_minutes: f64,

    /// Beta parameters for the hourly completed fraction.
    #[serde(default = "default_hourly_completion_alpha")]
    pub hourly_completion_alpha: f64,
    #[serde(default = "default_hourly_completion_beta")]
    pub hourly_completion_beta: f64,

    /// Gamma parameters for the daily appointment total.
    #[serde(default = "default_daily_total_shape")]
    pub daily_total_shape: f64,
    #[serde(default = "default_daily_total_scale")]
    pub daily_total_scale: f64,

    /// Beta parameters for the daily completion rate.
    #[serde(default = "default_daily_completion_alpha")]
    pub daily_completion_alpha: f64,
    #[serde(default = "default_daily_completion_beta")]
    pub daily_completion_beta: f64,

    /// Exponential no-show fraction: scale and hard cap, both fractions.
    #[serde(default = "default_no_show_scale")]
    pub no_show_scale: f64,
    #[serde(default = "default_no_show_cap")]
    pub no_show_cap: f64,

    /// Log-normal daily wait: median in minutes and sigma of the log.
    #[serde(default = "default_wait_median_minutes")]
    pub wait_median_minutes: f64,
    #[serde(default = "default_wait_log_sigma")]
    pub wait_log_sigma: f64,

    /// Weekly appointment total range, inclusive.
    #[serde(default = "default_weekly_total_min")]
    pub weekly_total_min: u32,
    #[serde(default = "default_weekly_total_max")]
    pub weekly_total_max: u32,

    /// Relative jitter applied to the weekday share template, 0..1.
    #[serde(default = "default_weekly_share_jitter")]
    pub weekly_share_jitter: f64,
}

fn default_base_arrival_rate() -> f64 {
    4.2
}

fn default_demand_amplification() -> f64 {
    8.0
}

fn default_wait_mean_minutes() -> f64 {
    32.0
}

fn default_wait_std_minutes() -> f64 {
    12.0
}

fn default_hourly_completion_alpha() -> f64 {
    9.0
}

fn default_hourly_completion_beta() -> f64 {
    1.5
}

fn default_daily_total_shape() -> f64 {
    6.0
}

fn default_daily_total_scale() -> f64 {
    15.0
}

fn default_daily_completion_alpha() -> f64 {
    8.5
}

fn default_daily_completion_beta() -> f64 {
    1.8
}

fn default_no_show_scale() -> f64 {
    0.08
}

fn default_no_show_cap() -> f64 {
    0.25
}

fn default_wait_median_minutes() -> f64 {
    25.0
}

fn default_wait_log_sigma() -> f64 {
    0.5
}

fn default_weekly_total_min() -> u32 {
    100
}

fn default_weekly_total_max() -> u32 {
    300
}

fn default_weekly_share_jitter() -> f64 {
    0.2
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_arrival_rate: default_base_arrival_rate(),
            demand_amplification: default_demand_amplification(),
            wait_mean_minutes: default_wait_mean_minutes(),
            wait_std_minutes: default_wait_std_minutes(),
            hourly_completion_alpha: default_hourly_completion_alpha(),
            hourly_completion_beta: default_hourly_completion_beta(),
            daily_total_shape: default_daily_total_shape(),
            daily_total_scale: default_daily_total_scale(),
            daily_completion_alpha: default_daily_completion_alpha(),
            daily_completion_beta: default_daily_completion_beta(),
            no_show_scale: default_no_show_scale(),
            no_show_cap: default_no_show_cap(),
            wait_median_minutes: default_wait_median_minutes(),
            wait_log_sigma: default_wait_log_sigma(),
            weekly_total_min: default_weekly_total_min(),
            weekly_total_max: default_weekly_total_max(),
            weekly_share_jitter: default_weekly_share_jitter(),
        }
    }
}

// ============================================================================
// Forecast
// ============================================================================

/// Tuning for the forecasting helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Exponential smoothing factor, 0..=1.
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,

    /// Days ahead produced by the report forecast.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
}

fn default_smoothing_alpha() -> f64 {
    0.3
}

fn default_horizon_days() -> usize {
    7
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: default_smoothing_alpha(),
            horizon_days: default_horizon_days(),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Thresholds driving report recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Completion-rate slope below which the trend counts as declining.
    #[serde(default = "default_declining_trend_threshold")]
    pub declining_trend_threshold: f64,

    /// Mean wait above which a staffing recommendation fires, minutes.
    #[serde(default = "default_wait_alert_minutes")]
    pub wait_alert_minutes: f64,

    /// Mean no-show rate above which a reminder recommendation fires,
    /// percent.
    #[serde(default = "default_no_show_alert_pct")]
    pub no_show_alert_pct: f64,
}

fn default_declining_trend_threshold() -> f64 {
    -0.1
}

fn default_wait_alert_minutes() -> f64 {
    45.0
}

fn default_no_show_alert_pct() -> f64 {
    15.0
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            declining_trend_threshold: default_declining_trend_threshold(),
            wait_alert_minutes: default_wait_alert_minutes(),
            no_show_alert_pct: default_no_show_alert_pct(),
        }
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Payload cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time to live for cached payloads, seconds.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

// ============================================================================
// Top-level config
// ============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl EngineConfig {
    /// Parse a TOML string and validate the result.
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the TOML file
    ///
    /// # Returns
    /// The validated configuration, or an error if the file cannot be read,
    /// parsed, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load configuration from the first default location that exists.
    ///
    /// Search order: `csi.toml`, `config/csi.toml`, `../csi.toml`.
    pub fn from_default_location() -> ConfigResult<Self> {
        let candidates = ["csi.toml", "config/csi.toml", "../csi.toml"];
        for candidate in candidates {
            if Path::new(candidate).exists() {
                log::info!("loading engine config from {}", candidate);
                return Self::from_file(candidate);
            }
        }
        Err(ConfigError::Invalid(format!(
            "no config file found in default locations: {}",
            candidates.join(", ")
        )))
    }

    /// Check cross-field and range constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        let sim = &self.simulation;
        if sim.base_arrival_rate <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.base_arrival_rate must be positive".into(),
            ));
        }
        if sim.demand_amplification <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.demand_amplification must be positive".into(),
            ));
        }
        if sim.wait_std_minutes < 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.wait_std_minutes must not be negative".into(),
            ));
        }
        if sim.hourly_completion_alpha <= 0.0 || sim.hourly_completion_beta <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation hourly completion beta parameters must be positive".into(),
            ));
        }
        if sim.daily_total_shape <= 0.0 || sim.daily_total_scale <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation daily total gamma parameters must be positive".into(),
            ));
        }
        if sim.daily_completion_alpha <= 0.0 || sim.daily_completion_beta <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation daily completion beta parameters must be positive".into(),
            ));
        }
        if sim.no_show_scale <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.no_show_scale must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&sim.no_show_cap) || sim.no_show_cap == 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.no_show_cap must be in (0, 1]".into(),
            ));
        }
        if sim.wait_median_minutes <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.wait_median_minutes must be positive".into(),
            ));
        }
        if sim.wait_log_sigma < 0.0 {
            return Err(ConfigError::Invalid(
                "simulation.wait_log_sigma must not be negative".into(),
            ));
        }
        if sim.weekly_total_min == 0 || sim.weekly_total_min > sim.weekly_total_max {
            return Err(ConfigError::Invalid(
                "simulation weekly total range must satisfy 1 <= min <= max".into(),
            ));
        }
        if !(0.0..1.0).contains(&sim.weekly_share_jitter) {
            return Err(ConfigError::Invalid(
                "simulation.weekly_share_jitter must be in [0, 1)".into(),
            ));
        }

        let forecast = &self.forecast;
        if !(0.0..=1.0).contains(&forecast.smoothing_alpha) || forecast.smoothing_alpha == 0.0 {
            return Err(ConfigError::Invalid(
                "forecast.smoothing_alpha must be in (0, 1]".into(),
            ));
        }
        if forecast.horizon_days == 0 {
            return Err(ConfigError::Invalid(
                "forecast.horizon_days must be at least 1".into(),
            ));
        }

        let report = &self.report;
        if report.wait_alert_minutes <= 0.0 {
            return Err(ConfigError::Invalid(
                "report.wait_alert_minutes must be positive".into(),
            ));
        }
        if !(0.0..=100.0).contains(&report.no_show_alert_pct) {
            return Err(ConfigError::Invalid(
                "report.no_show_alert_pct must be in [0, 100]".into(),
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Invalid(
                "cache.ttl_seconds must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
