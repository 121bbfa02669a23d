use std::time::Instant;

use pixpet_core::grid::{Rgba, SpriteGrid};
use pixpet_metrics::format::{format_connected, format_percent};
use pixpet_metrics::{MetricSnapshot, Sampler};

use crate::classic::{classic_frame, classic_palette, CLASSIC_SIZE};
use crate::clock::{AnimationClock, BlinkFrame};
use crate::mood::{Mood, Thresholds};
use crate::overlay::Overlays;
use crate::sprite::{build_frame, Pose, PALETTE, RICH_SIZE};

/// Which sprite family the pet draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// 25×25 cat with eye and body overlays.
    #[default]
    Rich,
    /// 8×8 cat on a mood-coloured background.
    Classic,
}

/// A finished frame plus the palette that colours its codes.
#[derive(Debug, Clone, PartialEq)]
pub enum PetFrame {
    Rich(SpriteGrid<RICH_SIZE>),
    Classic {
        grid: SpriteGrid<CLASSIC_SIZE>,
        palette: [Rgba; 2],
    },
}

impl PetFrame {
    pub fn palette(&self) -> &[Rgba] {
        match self {
            PetFrame::Rich(_) => &PALETTE,
            PetFrame::Classic { palette, .. } => palette,
        }
    }
}

/// What happened during one [`Pet::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// The snapshot taken this tick, if a refresh was due.
    pub refreshed: Option<MetricSnapshot>,
    pub blinked: bool,
}

/// The desktop pet: latest snapshot, animation clock, and frame assembly.
///
/// The main loop owns one `Pet` and calls [`tick`](Self::tick) once per
/// loop iteration, then [`frame`](Self::frame) to get the pixels to draw.
pub struct Pet {
    variant: Variant,
    thresholds: Thresholds,
    clock: AnimationClock,
    snapshot: Option<MetricSnapshot>,
}

impl Pet {
    pub fn new(variant: Variant, thresholds: Thresholds, clock: AnimationClock) -> Self {
        Self {
            variant,
            thresholds,
            clock,
            snapshot: None,
        }
    }

    /// Advance the clock; re-sample through `sampler` when a refresh is due.
    ///
    /// The new snapshot replaces the old one as a whole.
    pub fn tick(&mut self, now: Instant, sampler: &mut dyn Sampler) -> TickReport {
        let outcome = self.clock.tick(now);
        let refreshed = outcome.refresh_due.then(|| sampler.sample());
        if let Some(snap) = refreshed {
            self.snapshot = Some(snap);
        }
        TickReport {
            refreshed,
            blinked: outcome.blinked,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn snapshot(&self) -> Option<&MetricSnapshot> {
        self.snapshot.as_ref()
    }

    /// Classic mood; `Neutral` until the first snapshot.
    pub fn mood(&self) -> Mood {
        self.snapshot
            .map(|snap| Mood::derive(&snap, &self.thresholds))
            .unwrap_or(Mood::Neutral)
    }

    /// Rich overlay flags; all clear until the first snapshot.
    pub fn overlays(&self) -> Overlays {
        self.snapshot
            .map(|snap| Overlays::derive(&snap, &self.thresholds))
            .unwrap_or_default()
    }

    /// Sleepy overrides the blink animation entirely.
    pub fn pose(&self) -> Pose {
        if self.overlays().sleepy {
            return Pose::Sleepy;
        }
        match self.clock.blink_frame() {
            BlinkFrame::Open => Pose::Normal,
            BlinkFrame::Closed => Pose::Blinking,
        }
    }

    /// Assemble this tick's frame from scratch.
    pub fn frame(&self) -> PetFrame {
        match self.variant {
            Variant::Rich => PetFrame::Rich(build_frame(self.pose(), &self.overlays())),
            Variant::Classic => PetFrame::Classic {
                grid: classic_frame(self.clock.toggles()),
                palette: classic_palette(self.mood()),
            },
        }
    }

    /// One-line report of a snapshot and the mood it produces.
    pub fn describe(&self, snap: &MetricSnapshot) -> String {
        format!(
            "Mood: {} | CPU Usage: {:.2}% | RAM Usage: {:.2}% | Battery: {} | Internet Connection: {}",
            Mood::derive(snap, &self.thresholds),
            snap.cpu_percent,
            snap.ram_percent,
            snap.battery,
            format_connected(snap.connected),
        )
    }

    /// HUD lines describing the pet's state.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("MOOD {}", self.mood())];
        match self.variant {
            Variant::Rich => {
                lines.push(format!("POSE {}", self.pose().name()));
                let labels = self.overlays().labels();
                if labels.is_empty() {
                    lines.push("FX   none".to_string());
                } else {
                    lines.push(format!("FX   {}", labels.join(", ")));
                }
            }
            Variant::Classic => {
                lines.push(format!("STEP {}", self.clock.toggles() % 3));
            }
        }
        if let Some(snap) = &self.snapshot {
            lines.push(format!("LOAD {}", format_percent(snap.cpu_percent)));
        }
        lines
    }
}
