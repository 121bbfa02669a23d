use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level `config.toml` schema. Every section and field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PetConfig {
    pub timing: TimingConfig,
    pub thresholds: ThresholdConfig,
    pub telemetry: TelemetryConfig,
}

/// Loop cadence and the two animation-clock intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub tick_ms: u64,
    pub blink_ms: u64,
    pub refresh_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            blink_ms: 2500,
            refresh_secs: 60,
        }
    }
}

impl TimingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn blink(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }

    pub fn refresh(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

/// Metric thresholds feeding the mood rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    pub cpu_high: f64,
    pub ram_high: f64,
    pub cpu_busy: f64,
    pub battery_low: u8,
    pub battery_full: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_high: 80.0,
            ram_high: 80.0,
            cpu_busy: 60.0,
            battery_low: 20,
            battery_full: 100,
        }
    }
}

/// How the connectivity signal is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityMode {
    /// Any non-loopback interface with an address counts as connected.
    #[default]
    Interfaces,
    /// A background TCP connect to `probe_addr`.
    Probe,
}

/// Where host telemetry is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    pub proc_root: PathBuf,
    pub sys_root: PathBuf,
    pub battery: String,
    pub connectivity: ConnectivityMode,
    pub probe_addr: String,
    pub probe_timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
            battery: "BAT0".to_string(),
            connectivity: ConnectivityMode::Interfaces,
            probe_addr: "google.com:80".to_string(),
            probe_timeout_ms: 1000,
        }
    }
}

impl TelemetryConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl PetConfig {
    /// Parse and validate config TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Otherwise `PIXPET_CONFIG`, then the
    /// per-user default location are tried, and missing files fall back to
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        if let Some(raw) = std::env::var_os("PIXPET_CONFIG") {
            return Self::from_path(Path::new(&raw));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let timing = &self.timing;
        validate_nonzero("timing.tick_ms", timing.tick_ms)?;
        validate_nonzero("timing.blink_ms", timing.blink_ms)?;
        validate_nonzero("timing.refresh_secs", timing.refresh_secs)?;

        let t = &self.thresholds;
        validate_percent("thresholds.cpu_high", t.cpu_high)?;
        validate_percent("thresholds.ram_high", t.ram_high)?;
        validate_percent("thresholds.cpu_busy", t.cpu_busy)?;
        validate_percent("thresholds.battery_low", f64::from(t.battery_low))?;
        validate_percent("thresholds.battery_full", f64::from(t.battery_full))?;
        if t.battery_low > t.battery_full {
            bail!(
                "thresholds.battery_low ({}) must not exceed thresholds.battery_full ({})",
                t.battery_low,
                t.battery_full
            );
        }

        let tel = &self.telemetry;
        validate_nonempty("telemetry.battery", &tel.battery)?;
        validate_nonempty("telemetry.probe_addr", &tel.probe_addr)?;
        validate_nonzero("telemetry.probe_timeout_ms", tel.probe_timeout_ms)?;

        Ok(())
    }
}

/// `<config dir>/pixpet/config.toml`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pixpet").join("config.toml"))
}

fn validate_nonzero(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        bail!("{field} must be greater than zero");
    }
    Ok(())
}

fn validate_percent(field: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        bail!("{field} must be within 0-100, got {value}");
    }
    Ok(())
}

fn validate_nonempty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty");
    }
    Ok(())
}
