use std::time::{Duration, Instant};

/// Process-wide bookkeeping owned by the main loop.
pub struct AppState {
    pub started_at: Instant,
    pub status_line: String,
}

impl AppState {
    pub fn started(at: Instant) -> Self {
        Self {
            started_at: at,
            status_line: "waking up".to_string(),
        }
    }

    /// Time elapsed since startup, measured against `now`.
    pub fn uptime(&self, now: Instant) -> Duration {
        now.checked_duration_since(self.started_at)
            .unwrap_or(Duration::ZERO)
    }
}
