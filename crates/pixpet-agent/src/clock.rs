use std::time::{Duration, Instant};

const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(2500);
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Which of the two blink frames is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlinkFrame {
    #[default]
    Open,
    Closed,
}

impl BlinkFrame {
    pub fn toggled(self) -> Self {
        match self {
            BlinkFrame::Open => BlinkFrame::Closed,
            BlinkFrame::Closed => BlinkFrame::Open,
        }
    }
}

/// What a single [`AnimationClock::tick`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Metrics should be re-sampled this tick.
    pub refresh_due: bool,
    /// The blink frame flipped this tick.
    pub blinked: bool,
}

/// Two independent interval timers: blink toggling and metric refresh.
///
/// Unlike a catch-up animation, a late tick fires each timer at most once and
/// restarts it from that tick, so the blink frame never flips twice in one
/// tick. The refresh timer starts expired so the first tick samples.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    blink_interval: Duration,
    refresh_interval: Duration,
    blink_frame: BlinkFrame,
    toggles: u64,
    last_blink: Instant,
    last_refresh: Option<Instant>,
}

impl AnimationClock {
    pub fn new(blink_interval: Duration, refresh_interval: Duration, now: Instant) -> Self {
        Self {
            blink_interval,
            refresh_interval,
            blink_frame: BlinkFrame::Open,
            toggles: 0,
            last_blink: now,
            last_refresh: None,
        }
    }

    /// 2.5 s blink, 60 s refresh.
    pub fn with_defaults(now: Instant) -> Self {
        Self::new(DEFAULT_BLINK_INTERVAL, DEFAULT_REFRESH_INTERVAL, now)
    }

    /// Advance both timers to `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let refresh_due = match self.last_refresh {
            None => true,
            Some(last) => elapsed(last, now) >= self.refresh_interval,
        };
        if refresh_due {
            self.last_refresh = Some(now);
        }

        let blinked = elapsed(self.last_blink, now) >= self.blink_interval;
        if blinked {
            self.blink_frame = self.blink_frame.toggled();
            self.toggles += 1;
            self.last_blink = now;
        }

        TickOutcome {
            refresh_due,
            blinked,
        }
    }

    pub fn blink_frame(&self) -> BlinkFrame {
        self.blink_frame
    }

    /// Total number of blink toggles so far.
    pub fn toggles(&self) -> u64 {
        self.toggles
    }
}

fn elapsed(since: Instant, now: Instant) -> Duration {
    now.checked_duration_since(since).unwrap_or(Duration::ZERO)
}
