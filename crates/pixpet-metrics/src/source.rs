//! Live telemetry reader over the kernel's pseudo-files.
//!
//! CPU usage is a delta between two `/proc/stat` samples, so the source keeps
//! the previous sample. Every public read degrades to a documented default on
//! failure and logs why; nothing propagates to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use pixpet_config::TelemetryConfig;

use crate::connectivity::Connectivity;
use crate::snapshot::{Battery, MetricSnapshot};
use crate::Sampler;

/// Aggregate CPU time counters from one `/proc/stat` read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CpuTimes {
    idle: u64,
    total: u64,
}

impl CpuTimes {
    /// Parse the aggregate `cpu` line.
    ///
    /// Sums user, nice, system, idle, iowait, irq, softirq and steal (later
    /// guest columns are already folded into user/nice). Idle time is
    /// `idle + iowait`. Kernels exposing fewer columns count the rest as 0.
    fn parse(stat: &str) -> Result<Self> {
        let line = stat
            .lines()
            .find(|line| line.split_whitespace().next() == Some("cpu"))
            .context("no aggregate cpu line")?;

        let fields = line
            .split_whitespace()
            .skip(1)
            .take(8)
            .map(|field| {
                field
                    .parse::<u64>()
                    .with_context(|| format!("bad cpu counter {field:?}"))
            })
            .collect::<Result<Vec<u64>>>()?;

        if fields.len() < 4 {
            bail!("aggregate cpu line has {} counters, need at least 4", fields.len());
        }

        let iowait = fields.get(4).copied().unwrap_or(0);
        Ok(Self {
            idle: fields[3] + iowait,
            total: fields.iter().sum(),
        })
    }

    /// Busy percentage between `prev` and `self`; 0.0 if the counters did
    /// not advance.
    fn usage_since(&self, prev: &CpuTimes) -> f64 {
        if self.total <= prev.total {
            return 0.0;
        }
        let delta_total = (self.total - prev.total) as f64;
        let delta_idle = self.idle.saturating_sub(prev.idle) as f64;
        ((1.0 - delta_idle / delta_total) * 100.0).clamp(0.0, 100.0)
    }
}

/// RAM utilisation from `/proc/meminfo` text.
///
/// Uses `MemAvailable` when the kernel reports it, `MemFree` otherwise.
fn parse_meminfo(text: &str) -> Result<f64> {
    let mut total = None;
    let mut available = None;
    let mut free = None;

    for line in text.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut total,
            "MemAvailable" => &mut available,
            "MemFree" => &mut free,
            _ => continue,
        };
        let value = rest
            .split_whitespace()
            .next()
            .with_context(|| format!("{key} has no value"))?;
        *slot = Some(
            value
                .parse::<u64>()
                .with_context(|| format!("bad {key} value {value:?}"))?,
        );
    }

    let total = total.context("MemTotal missing")?;
    if total == 0 {
        bail!("MemTotal is zero");
    }
    let unused = available.or(free).context("neither MemAvailable nor MemFree present")?;
    let used = total.saturating_sub(unused);
    Ok(used as f64 / total as f64 * 100.0)
}

/// Reads CPU, RAM and battery from `proc_root`/`sys_root` and asks the
/// configured [`Connectivity`] strategy whether the host is online.
pub struct MetricSource {
    proc_root: PathBuf,
    sys_root: PathBuf,
    battery: String,
    connectivity: Connectivity,
    prev_cpu: Option<CpuTimes>,
}

impl MetricSource {
    pub fn new(
        proc_root: impl Into<PathBuf>,
        sys_root: impl Into<PathBuf>,
        battery: impl Into<String>,
        connectivity: Connectivity,
    ) -> Self {
        Self {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
            battery: battery.into(),
            connectivity,
            prev_cpu: None,
        }
    }

    /// Build a source from the `[telemetry]` config section.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(
            &config.proc_root,
            &config.sys_root,
            &config.battery,
            Connectivity::from_config(config),
        )
    }

    fn stat_path(&self) -> PathBuf {
        self.proc_root.join("stat")
    }

    fn meminfo_path(&self) -> PathBuf {
        self.proc_root.join("meminfo")
    }

    fn capacity_path(&self) -> PathBuf {
        self.sys_root
            .join("class")
            .join("power_supply")
            .join(&self.battery)
            .join("capacity")
    }

    /// CPU busy percentage since the previous call.
    ///
    /// The first successful call has no baseline and returns 0.0. An
    /// unreadable counters file also returns 0.0 and keeps the old baseline.
    pub fn read_cpu_usage(&mut self) -> f64 {
        let path = self.stat_path();
        match read_text(&path).and_then(|text| CpuTimes::parse(&text)) {
            Ok(now) => {
                let usage = self
                    .prev_cpu
                    .map(|prev| now.usage_since(&prev))
                    .unwrap_or(0.0);
                self.prev_cpu = Some(now);
                usage
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "cpu read failed");
                0.0
            }
        }
    }

    /// RAM used percentage, or 0.0 when the memory accounting is unreadable.
    pub fn read_ram_usage(&self) -> f64 {
        let path = self.meminfo_path();
        match read_text(&path).and_then(|text| parse_meminfo(&text)) {
            Ok(pct) => pct,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "ram read failed");
                0.0
            }
        }
    }

    /// Battery charge, or [`Battery::Unknown`] when there is no usable
    /// capacity indicator.
    pub fn read_battery_percent(&self) -> Battery {
        let path = self.capacity_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no battery capacity indicator");
                return Battery::Unknown;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "battery read failed");
                return Battery::Unknown;
            }
        };
        match raw.trim().parse::<i64>() {
            Ok(value) => Battery::from_capacity(value),
            Err(err) => {
                tracing::warn!(path = %path.display(), value = raw.trim(), error = %err, "battery capacity unparseable");
                Battery::Unknown
            }
        }
    }

    /// Best-effort connectivity signal.
    pub fn read_connectivity(&mut self) -> bool {
        self.connectivity.is_connected()
    }
}

impl Sampler for MetricSource {
    fn sample(&mut self) -> MetricSnapshot {
        MetricSnapshot {
            cpu_percent: self.read_cpu_usage(),
            ram_percent: self.read_ram_usage(),
            battery: self.read_battery_percent(),
            connected: self.read_connectivity(),
        }
    }

    fn label(&self) -> &'static str {
        "live"
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
