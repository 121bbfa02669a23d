use std::fmt;

/// Battery charge as read from the platform, or the "no battery" sentinel.
///
/// Callers decide what `Unknown` means for them; it is never a real 0–100
/// reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Battery {
    Percent(u8),
    #[default]
    Unknown,
}

impl Battery {
    /// Build a reading, clamping to 0–100.
    pub fn from_capacity(raw: i64) -> Self {
        Battery::Percent(raw.clamp(0, 100) as u8)
    }

    /// The reading, or `None` for the sentinel.
    pub fn percent(self) -> Option<u8> {
        match self {
            Battery::Percent(p) => Some(p),
            Battery::Unknown => None,
        }
    }

    /// The reading, treating an unknown battery as full.
    pub fn or_full(self) -> u8 {
        self.percent().unwrap_or(100)
    }
}

impl fmt::Display for Battery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Battery::Percent(p) => write!(f, "{p}%"),
            Battery::Unknown => f.write_str("unknown"),
        }
    }
}

/// One atomically captured set of telemetry readings.
///
/// Snapshots are values: a refresh builds a whole new one and replaces the
/// previous snapshot wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSnapshot {
    /// CPU utilisation, 0.0–100.0.
    pub cpu_percent: f64,
    /// RAM utilisation, 0.0–100.0.
    pub ram_percent: f64,
    pub battery: Battery,
    /// Best-effort reachability signal.
    pub connected: bool,
}

impl Default for MetricSnapshot {
    /// The all-defaults snapshot a fully failed read degrades to.
    fn default() -> Self {
        Self {
            cpu_percent: 0.0,
            ram_percent: 0.0,
            battery: Battery::Unknown,
            connected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(Battery::from_capacity(-4), Battery::Percent(0));
        assert_eq!(Battery::from_capacity(57), Battery::Percent(57));
        assert_eq!(Battery::from_capacity(104), Battery::Percent(100));
    }

    #[test]
    fn unknown_battery_reads_as_full_only_on_request() {
        assert_eq!(Battery::Unknown.percent(), None);
        assert_eq!(Battery::Unknown.or_full(), 100);
        assert_eq!(Battery::Percent(12).or_full(), 12);
    }

    #[test]
    fn battery_display() {
        assert_eq!(Battery::Percent(42).to_string(), "42%");
        assert_eq!(Battery::Unknown.to_string(), "unknown");
    }

    #[test]
    fn default_snapshot_is_the_failure_fallback() {
        let snap = MetricSnapshot::default();
        assert_eq!(snap.cpu_percent, 0.0);
        assert_eq!(snap.ram_percent, 0.0);
        assert_eq!(snap.battery, Battery::Unknown);
        assert!(!snap.connected);
    }
}
