//! Configuration schema and loaders for pixpet.
//!
//! This crate owns the on-disk `config.toml` layout so the app, the metric
//! sampler and the animation clock read their knobs from one place.

pub mod pet;

pub use pet::{ConnectivityMode, PetConfig, TelemetryConfig, ThresholdConfig, TimingConfig};
