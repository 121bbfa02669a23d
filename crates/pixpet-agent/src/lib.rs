//! Mood derivation and sprite animation for the pixel cat.
//!
//! A [`MetricSnapshot`](pixpet_metrics::MetricSnapshot) is mapped to either
//! a single [`Mood`] (classic variant) or a set of [`Overlays`] (rich
//! variant). The [`Pet`] combines that with the [`AnimationClock`] to pick a
//! pose and assemble a fresh sprite grid every frame.
//!
//! # Quick start
//!
//! ```no_run
//! use std::time::Instant;
//! use pixpet_agent::{AnimationClock, Pet, Thresholds, Variant};
//! use pixpet_metrics::ScenarioCycle;
//!
//! let now = Instant::now();
//! let clock = AnimationClock::with_defaults(now);
//! let mut pet = Pet::new(Variant::Rich, Thresholds::default(), clock);
//! let mut sampler = ScenarioCycle::new();
//! pet.tick(now, &mut sampler);
//! let _frame = pet.frame();
//! ```

mod classic;
mod clock;
mod mood;
mod overlay;
mod pet;
mod sprite;

pub use classic::{classic_frame, classic_palette, CLASSIC_FRAMES, CLASSIC_SIZE};
pub use clock::{AnimationClock, BlinkFrame, TickOutcome};
pub use mood::{Mood, Thresholds};
pub use overlay::Overlays;
pub use pet::{Pet, PetFrame, TickReport, Variant};
pub use sprite::{build_frame, Cell, Pose, EYE_PIXELS, PALETTE, RICH_SIZE};
