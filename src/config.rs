use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::domain::errors::DashboardError;
use crate::domain::logging::LogLevel;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// What to do with a response that arrives after the selection moved on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    /// Drop results whose symbol no longer matches the selection
    #[default]
    DiscardStale,
    /// Whatever completes last is shown, even for an old symbol
    LastWriterWins,
}

/// Layout of the price chart section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Trailing number of closes to chart
    pub window: usize,
    pub height: f64,
    /// Horizontal padding subtracted from the device width
    pub horizontal_inset: f64,
    /// Every n-th timestamp of the window gets a label
    pub label_stride: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { window: 20, height: 180.0, horizontal_inset: 64.0, label_stride: 5 }
    }
}

impl ChartConfig {
    pub fn chart_width(&self, device_width: f64) -> f64 {
        (device_width - self.horizontal_inset).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_url: String,
    pub response_policy: ResponsePolicy,
    /// Minimum level written by the console logger
    pub log_level: LogLevel,
    pub chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            response_policy: ResponsePolicy::default(),
            log_level: LogLevel::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        serde_json::from_str(json)
            .map_err(|e| DashboardError::ConfigError(format!("Invalid dashboard config: {e}")))
    }

    /// Defaults overridden by `STOCK_MONITOR_API_URL`, `STOCK_MONITOR_RESPONSE_POLICY`
    /// and `STOCK_MONITOR_LOG_LEVEL`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, DashboardError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("STOCK_MONITOR_API_URL") {
            config.api_url = url;
        }
        if let Ok(policy) = std::env::var("STOCK_MONITOR_RESPONSE_POLICY") {
            config.response_policy = policy.parse().map_err(|_| {
                DashboardError::ConfigError(format!("Unknown response policy: {policy}"))
            })?;
        }
        if let Ok(level) = std::env::var("STOCK_MONITOR_LOG_LEVEL") {
            config.log_level = level
                .parse()
                .map_err(|_| DashboardError::ConfigError(format!("Unknown log level: {level}")))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            DashboardConfig::from_json(r#"{"api_url":"http://10.0.0.2:5000","chart":{"window":30}}"#)
                .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2:5000");
        assert_eq!(config.response_policy, ResponsePolicy::DiscardStale);
        assert_eq!(config.chart.window, 30);
        assert_eq!(config.chart.label_stride, 5);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn policy_parses_from_snake_case() {
        assert_eq!("last_writer_wins".parse::<ResponsePolicy>().unwrap(), ResponsePolicy::LastWriterWins);
        assert!(DashboardConfig::from_json(r#"{"response_policy":"sometimes"}"#).is_err());
        let config = DashboardConfig::from_json(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn chart_width_never_negative() {
        let chart = ChartConfig::default();
        assert_eq!(chart.chart_width(424.0), 360.0);
        assert_eq!(chart.chart_width(10.0), 0.0);
    }
}
