use crate::sample::UNKNOWN;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_LATENCY_HOST: &str = "8.8.8.8";
pub const DEFAULT_PING_TIMEOUT_SECS: u64 = 2;
pub const DEFAULT_REPORT_FILE: &str = "wifi_report.csv";

/// Parameters of the tracking loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Minimum gap between the end of one tick and the start of the next.
    pub interval: Duration,
    pub latency_host: String,
    pub default_location: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            latency_host: DEFAULT_LATENCY_HOST.to_string(),
            default_location: UNKNOWN.to_string(),
        }
    }
}

/// User settings persisted as JSON. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub interval_secs: u64,
    pub latency_host: String,
    pub default_location: String,
    pub ping_timeout_secs: u64,
    pub report_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            latency_host: DEFAULT_LATENCY_HOST.to_string(),
            default_location: UNKNOWN.to_string(),
            ping_timeout_secs: DEFAULT_PING_TIMEOUT_SECS,
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}

impl Settings {
    /// `<config dir>/airtrace/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            Error::InvalidConfig("could not determine the user config directory".to_string())
        })?;
        Ok(base.join("airtrace").join("config.json"))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::debug!("Loading settings from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;

        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        tracing::info!("Wrote settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(Error::InvalidConfig("interval_secs must be at least 1".to_string()));
        }
        if self.latency_host.trim().is_empty() {
            return Err(Error::InvalidConfig("latency_host must not be empty".to_string()));
        }
        if self.ping_timeout_secs == 0 {
            return Err(Error::InvalidConfig("ping_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            interval: Duration::from_secs(self.interval_secs),
            latency_host: self.latency_host.clone(),
            default_location: self.default_location.clone(),
        }
    }
}
