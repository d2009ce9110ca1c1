// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
/// Optional settings file read from the working directory at startup.
pub const CONFIG_FILE: &str = "bite_logger.json";
/// ADC calibration of the bite sensor front end.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Reference voltage of the converter.
    pub vref: f64,
    /// Number of codes, 2^16 for the stock 16-bit ADC.
    pub resolution: f64,
    /// Zero point subtracted after scaling.
    pub offset: f64,
}
impl Default for Calibration {
    fn default() -> Self {
        Self {
            vref: 4.0,
            resolution: 65536.0,
            offset: 2.0,
        }
    }
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    /// Buffered sample count that triggers a flush.
    pub flush_threshold: usize,
    /// Sleep between input drains while paused.
    pub idle_poll_ms: u64,
    pub log_path: PathBuf,
    pub calibration: Calibration,
}
impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout_ms: 1000,
            flush_threshold: 100,
            idle_poll_ms: 50,
            log_path: PathBuf::from("voltage_data.txt"),
            calibration: Calibration::default(),
        }
    }
}
impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(config)
    }
    /// Loads `path` when it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{e:#}; using defaults");
                Self::default()
            }
        }
    }
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "baud_rate": 9600, "calibration": { "vref": 3.3, "resolution": 4096.0, "offset": 0.0 } }"#).unwrap();
        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.flush_threshold, 100);
        assert_eq!(config.calibration.vref, 3.3);
        assert_eq!(config.read_timeout(), Duration::from_secs(1));
    }
    #[test]
    fn missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(PipelineConfig::load_or_default(&missing), PipelineConfig::default());
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(PipelineConfig::load(&broken).is_err());
        assert_eq!(PipelineConfig::load_or_default(&broken), PipelineConfig::default());
    }
}
