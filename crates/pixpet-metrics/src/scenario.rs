use crate::snapshot::{Battery, MetricSnapshot};
use crate::Sampler;

/// The canned snapshots `--test` mode cycles through, in order.
pub const SCENARIOS: [MetricSnapshot; 4] = [
    // Full battery, connected, idle.
    MetricSnapshot {
        cpu_percent: 10.0,
        ram_percent: 30.0,
        battery: Battery::Percent(100),
        connected: true,
    },
    // CPU pegged.
    MetricSnapshot {
        cpu_percent: 90.0,
        ram_percent: 30.0,
        battery: Battery::Percent(50),
        connected: true,
    },
    // RAM pressure.
    MetricSnapshot {
        cpu_percent: 10.0,
        ram_percent: 90.0,
        battery: Battery::Percent(50),
        connected: true,
    },
    // Offline.
    MetricSnapshot {
        cpu_percent: 10.0,
        ram_percent: 30.0,
        battery: Battery::Percent(50),
        connected: false,
    },
];

/// Deterministic sampler for `--test`: one scenario per refresh, wrapping.
#[derive(Debug, Default)]
pub struct ScenarioCycle {
    next: usize,
}

impl ScenarioCycle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sampler for ScenarioCycle {
    fn sample(&mut self) -> MetricSnapshot {
        let snap = SCENARIOS[self.next];
        self.next = (self.next + 1) % SCENARIOS.len();
        snap
    }

    fn label(&self) -> &'static str {
        "test"
    }
}
