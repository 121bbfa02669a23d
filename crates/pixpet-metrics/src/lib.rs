//! Host telemetry for the pet: CPU, RAM, battery and connectivity.
//!
//! [`MetricSource`] reads the live values from the kernel's pseudo-files;
//! [`ScenarioCycle`] replays a fixed list of canned snapshots for `--test`.
//! Both implement [`Sampler`], which is all the main loop sees.

pub mod connectivity;
pub mod format;
pub mod scenario;
pub mod snapshot;
pub mod source;

pub use connectivity::Connectivity;
pub use scenario::ScenarioCycle;
pub use snapshot::{Battery, MetricSnapshot};
pub use source::MetricSource;

/// Something that can produce a fresh [`MetricSnapshot`].
///
/// Sampling never fails: readers substitute documented defaults for values
/// they could not obtain.
pub trait Sampler {
    /// Take a new snapshot.
    fn sample(&mut self) -> MetricSnapshot;

    /// Short label for the status bar, e.g. `"live"`.
    fn label(&self) -> &'static str;
}
