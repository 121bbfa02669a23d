use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding-window ticks-per-second meter for the status bar.
///
/// Feed it one [`record`](TickRate::record) per loop iteration; the rate is
/// the number of ticks inside the window divided by the window length.
pub struct TickRate {
    stamps: VecDeque<Instant>,
    window: Duration,
}

impl Default for TickRate {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickRate {
    pub fn new(window: Duration) -> Self {
        Self {
            stamps: VecDeque::new(),
            window,
        }
    }

    /// Record a tick at `now` and forget ticks that fell out of the window.
    pub fn record(&mut self, now: Instant) {
        self.stamps.push_back(now);
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };
        while self.stamps.front().is_some_and(|&t| t < cutoff) {
            self.stamps.pop_front();
        }
    }

    /// Current rate in ticks per second; `0.0` until two ticks are recorded.
    pub fn per_second(&self) -> f64 {
        if self.stamps.len() < 2 || self.window.is_zero() {
            return 0.0;
        }
        self.stamps.len() as f64 / self.window.as_secs_f64()
    }
}
