use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::Setting;
use crate::cpu::DEFAULT_SAMPLE_INTERVAL_MS;
use crate::disk::DEFAULT_DISK_PATH;
use crate::error::{Error, Result};
use crate::timeseries::DEFAULT_WINDOW_CAPACITY;

/// Default sampling cadence in milliseconds
pub const DEFAULT_TICK_PERIOD_MS: u64 = 5000;

/// Sampler configuration
///
/// Every field can also be stored in the settings table under its own name;
/// see [`SamplerConfig::from_settings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Time between two ticks
    pub tick_period_ms: u64,
    /// Time the CPU provider measures load over
    pub cpu_sample_interval_ms: u64,
    /// Number of points kept per window
    pub window_capacity: usize,
    /// Path whose filesystem usage is reported
    pub disk_path: PathBuf,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            cpu_sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            disk_path: PathBuf::from(DEFAULT_DISK_PATH),
        }
    }
}

impl SamplerConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn cpu_sample_interval(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_interval_ms)
    }

    /// Default configuration overlaid with stored settings
    pub fn from_settings(settings: &[Setting]) -> Self {
        Self::default().with_settings(settings)
    }

    /// Overlays stored settings; unknown names and unparseable values are skipped
    pub fn with_settings(mut self, settings: &[Setting]) -> Self {
        for setting in settings {
            let value = setting.value.trim();
            let applied = match setting.name.as_str() {
                "tick_period_ms" => value.parse::<u64>().map(|v| self.tick_period_ms = v).is_ok(),
                "cpu_sample_interval_ms" => value.parse::<u64>().map(|v| self.cpu_sample_interval_ms = v).is_ok(),
                "window_capacity" => value.parse::<usize>().map(|v| self.window_capacity = v).is_ok(),
                "disk_path" if !value.is_empty() => {
                    self.disk_path = PathBuf::from(value);
                    true
                },
                "disk_path" => false,
                _ => continue,
            };

            if !applied {
                warn!(name = %setting.name, value = %setting.value, "ignoring unparseable setting");
            }
        }
        self
    }

    /// The configuration as settings rows
    pub fn to_settings(&self) -> Vec<Setting> {
        vec![
            Setting::new("tick_period_ms", self.tick_period_ms.to_string()),
            Setting::new("cpu_sample_interval_ms", self.cpu_sample_interval_ms.to_string()),
            Setting::new("window_capacity", self.window_capacity.to_string()),
            Setting::new("disk_path", self.disk_path.to_string_lossy()),
        ]
    }

    /// Parses and validates a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::invalid_config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(Error::invalid_config("tick_period_ms must be greater than zero"));
        }
        if self.cpu_sample_interval_ms == 0 {
            return Err(Error::invalid_config("cpu_sample_interval_ms must be greater than zero"));
        }
        if self.window_capacity == 0 {
            return Err(Error::invalid_config("window_capacity must be greater than zero"));
        }
        if self.disk_path.as_os_str().is_empty() {
            return Err(Error::invalid_config("disk_path must not be empty"));
        }
        if self.cpu_sample_interval_ms >= self.tick_period_ms {
            warn!(
                cpu_sample_interval_ms = self.cpu_sample_interval_ms,
                tick_period_ms = self.tick_period_ms,
                "CPU sample interval is not shorter than the tick period; ticks will be delayed"
            );
        }
        Ok(())
    }
}
