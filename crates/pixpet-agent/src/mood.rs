use std::fmt;

use pixpet_config::ThresholdConfig;
use pixpet_core::grid::Rgba;
use pixpet_metrics::MetricSnapshot;

/// Metric cut-offs shared by both mood rule sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub cpu_high: f64,
    pub ram_high: f64,
    pub cpu_busy: f64,
    pub battery_low: u8,
    pub battery_full: u8,
}

impl Default for Thresholds {
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

impl From<&ThresholdConfig> for Thresholds {
    fn from(config: &ThresholdConfig) -> Self {
        Self {
            cpu_high: config.cpu_high,
            ram_high: config.ram_high,
            cpu_busy: config.cpu_busy,
            battery_low: config.battery_low,
            battery_full: config.battery_full,
        }
    }
}

/// The classic variant's single-word mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    /// Shown before any snapshot exists; never derived.
    Neutral,
    Sad,
    Angry,
    Sweating,
    Tired,
    Confused,
}

impl Mood {
    /// Classify a snapshot. First matching rule wins:
    /// offline, low battery, CPU high, RAM high, CPU busy, otherwise happy.
    ///
    /// An unknown battery is treated as full.
    pub fn derive(snapshot: &MetricSnapshot, t: &Thresholds) -> Mood {
        if !snapshot.connected {
            Mood::Confused
        } else if snapshot.battery.or_full() < t.battery_low {
            Mood::Tired
        } else if snapshot.cpu_percent > t.cpu_high {
            Mood::Angry
        } else if snapshot.ram_percent > t.ram_high {
            Mood::Sad
        } else if snapshot.cpu_percent > t.cpu_busy {
            Mood::Sweating
        } else {
            Mood::Happy
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Neutral => "NEUTRAL",
            Mood::Sad => "SAD",
            Mood::Angry => "ANGRY",
            Mood::Sweating => "SWEATING",
            Mood::Tired => "TIRED",
            Mood::Confused => "CONFUSED",
        }
    }

    /// Background colour the classic cat is drawn on.
    pub fn color(self) -> Rgba {
        match self {
            Mood::Happy => Rgba::opaque(255, 255, 255),
            Mood::Neutral => Rgba::opaque(200, 200, 200),
            Mood::Sad => Rgba::opaque(0, 0, 255),
            Mood::Angry => Rgba::opaque(255, 0, 0),
            Mood::Sweating => Rgba::opaque(255, 165, 0),
            Mood::Tired => Rgba::opaque(169, 169, 169),
            Mood::Confused => Rgba::opaque(128, 0, 128),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
