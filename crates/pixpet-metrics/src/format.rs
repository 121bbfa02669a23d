//! Human-readable formatting for metric values.
//!
//! All functions are pure and easy to test in isolation.

use crate::snapshot::MetricSnapshot;

/// Format a percentage with one decimal, e.g. `"45.2%"`; NaN shows `"--%"`.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "--%".into()
    } else {
        format!("{value:.1}%")
    }
}

/// Format a connectivity flag the way the verbose report spells it.
pub fn format_connected(connected: bool) -> &'static str {
    if connected {
        "Connected"
    } else {
        "Disconnected"
    }
}

/// Format a duration in seconds as uptime, e.g. `"2h 15m 30s"`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;
    let s = secs % 60;

    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m {s}s")
    } else if mins > 0 {
        format!("{mins}m {s}s")
    } else {
        format!("{s}s")
    }
}

/// The HUD's metric lines for a snapshot.
pub fn snapshot_lines(snap: &MetricSnapshot) -> Vec<String> {
    vec![
        format!("CPU  {}", format_percent(snap.cpu_percent)),
        format!("RAM  {}", format_percent(snap.ram_percent)),
        format!("BAT  {}", snap.battery),
        format!("NET  {}", format_connected(snap.connected)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Battery;

    #[test]
    fn format_percent_normal() {
        assert_eq!(format_percent(45.2), "45.2%");
        assert_eq!(format_percent(100.0), "100.0%");
    }

    #[test]
    fn format_percent_nan() {
        assert_eq!(format_percent(f64::NAN), "--%");
    }

    #[test]
    fn format_uptime_ranges() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(2 * 3600 + 15 * 60 + 30), "2h 15m 30s");
        assert_eq!(format_uptime(3 * 86400 + 3600 + 45 * 60), "3d 1h 45m");
    }

    #[test]
    fn snapshot_lines_cover_every_metric() {
        let snap = MetricSnapshot {
            cpu_percent: 12.0,
            ram_percent: 48.5,
            battery: Battery::Unknown,
            connected: true,
        };
        assert_eq!(
            snapshot_lines(&snap),
            vec!["CPU  12.0%", "RAM  48.5%", "BAT  unknown", "NET  Connected"]
        );
    }
}
