//! Serializable analyzer configuration.
//!
//! Loaded from TOML; every section and every key falls back to its default,
//! so an empty file is a valid config:
//!
//! ```toml
//! [planner]
//! stop_buffer = 0.99
//! reward_multiple = 2.0
//! risk_fraction = 0.01
//!
//! [heuristics]
//! ma_period = 50
//!
//! [market_data]
//! base_url = "https://www.cse.lk/api/"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub planner: PlannerConfig,
    pub heuristics: HeuristicConfig,
    pub market_data: MarketDataConfig,
}

impl AnalyzerConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.planner.validate()?;
        self.heuristics.validate()?;
        self.market_data.validate()
    }
}

/// Planner tuning constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Multiplier applied to the swing low to place the stop (0.99 = 1% below).
    pub stop_buffer: f64,
    /// Target distance in units of risk per share (2.0 = 2R).
    pub reward_multiple: f64,
    /// Fraction of capital risked per trade (0.01 = 1%).
    pub risk_fraction: f64,
    /// Share counts above this are flagged with a warning.
    pub share_count_warn_threshold: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            stop_buffer: 0.99,
            reward_multiple: 2.0,
            risk_fraction: 0.01,
            share_count_warn_threshold: 1_000_000,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.stop_buffer > 0.0 && self.stop_buffer <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "planner.stop_buffer must be in (0, 1], got {}",
                self.stop_buffer
            )));
        }
        if !(self.reward_multiple > 0.0) || !self.reward_multiple.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "planner.reward_multiple must be > 0, got {}",
                self.reward_multiple
            )));
        }
        if !(self.risk_fraction > 0.0 && self.risk_fraction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "planner.risk_fraction must be in (0, 1), got {}",
                self.risk_fraction
            )));
        }
        if self.share_count_warn_threshold == 0 {
            return Err(ConfigError::Invalid(
                "planner.share_count_warn_threshold must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the bar-history estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub ma_period: usize,
    /// Number of trailing MA values compared for the slope check.
    pub slope_window: usize,
    pub resistance_lookback: usize,
    pub resistance_min_bars: usize,
    /// Relative distance from the peak that still counts as a touch.
    pub resistance_tolerance: f64,
    pub resistance_min_touches: usize,
    pub swing_lookback: usize,
    pub swing_min_bars: usize,
    /// Bars in the volume window, breakout bar included.
    pub volume_lookback: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            ma_period: 50,
            slope_window: 10,
            resistance_lookback: 60,
            resistance_min_bars: 20,
            resistance_tolerance: 0.02,
            resistance_min_touches: 2,
            swing_lookback: 20,
            swing_min_bars: 5,
            volume_lookback: 10,
        }
    }
}

impl HeuristicConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ma_period == 0 {
            return Err(ConfigError::Invalid("heuristics.ma_period must be >= 1".into()));
        }
        if self.slope_window < 2 {
            return Err(ConfigError::Invalid("heuristics.slope_window must be >= 2".into()));
        }
        if self.resistance_min_bars == 0 || self.resistance_min_touches == 0 {
            return Err(ConfigError::Invalid(
                "heuristics.resistance_min_bars and resistance_min_touches must be >= 1".into(),
            ));
        }
        if !(self.resistance_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "heuristics.resistance_tolerance must be >= 0, got {}",
                self.resistance_tolerance
            )));
        }
        if self.swing_min_bars == 0 {
            return Err(ConfigError::Invalid("heuristics.swing_min_bars must be >= 1".into()));
        }
        if self.volume_lookback < 2 {
            return Err(ConfigError::Invalid("heuristics.volume_lookback must be >= 2".into()));
        }
        Ok(())
    }
}

/// Market-data client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Chart period code; 5 selects daily bars.
    pub chart_period: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.cse.lk/api/".into(),
            timeout_secs: 15,
            max_retries: 2,
            chart_period: "5".into(),
        }
    }
}

impl MarketDataConfig {
    /// Upper bound on retries; backoff doubles per attempt.
    pub const MAX_RETRIES: u32 = 10;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "market_data.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("market_data.timeout_secs must be > 0".into()));
        }
        if self.max_retries > Self::MAX_RETRIES {
            return Err(ConfigError::Invalid(format!(
                "market_data.max_retries must be <= {}, got {}",
                Self::MAX_RETRIES,
                self.max_retries
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AnalyzerConfig::from_toml("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.planner.stop_buffer, 0.99);
        assert_eq!(config.planner.reward_multiple, 2.0);
        assert_eq!(config.planner.risk_fraction, 0.01);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = AnalyzerConfig::from_toml(
            r#"
[planner]
risk_fraction = 0.005

[heuristics]
ma_period = 20
"#,
        )
        .unwrap();
        assert_eq!(config.planner.risk_fraction, 0.005);
        assert_eq!(config.planner.stop_buffer, 0.99);
        assert_eq!(config.heuristics.ma_period, 20);
        assert_eq!(config.heuristics.slope_window, 10);
        assert_eq!(config.market_data.chart_period, "5");
    }

    #[test]
    fn rejects_out_of_range_risk_fraction() {
        let err = AnalyzerConfig::from_toml("[planner]\nrisk_fraction = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("risk_fraction")));
    }

    #[test]
    fn rejects_stop_buffer_above_one() {
        let config = PlannerConfig {
            stop_buffer: 1.01,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_base_url() {
        let err = AnalyzerConfig::from_toml("[market_data]\nbase_url = \"ftp://x\"\n").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn rejects_unbounded_max_retries() {
        let err = AnalyzerConfig::from_toml("[market_data]\nmax_retries = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("max_retries")));

        let config = AnalyzerConfig::from_toml("[market_data]\nmax_retries = 10\n").unwrap();
        assert_eq!(config.market_data.max_retries, MarketDataConfig::MAX_RETRIES);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = AnalyzerConfig::from_toml("[planner\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalyzerConfig::from_file(Path::new("/nonexistent/breakout.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
