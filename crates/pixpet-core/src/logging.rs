use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Severity of a captured log line, mirrored from `tracing` for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.pad(label)
    }
}

/// One captured log line.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Bounded in-memory tail of recent log lines, shared with the HUD.
#[derive(Clone)]
pub struct LogBuffer {
    inner: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest once at capacity.
    pub fn push(&self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut buf) = self.inner.lock() {
            while buf.len() >= self.capacity {
                buf.pop_front();
            }
            buf.push_back(entry);
        }
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        match self.inner.lock() {
            Ok(buf) => buf.iter().skip(buf.len().saturating_sub(n)).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

const TAIL_CAPACITY: usize = 200;
const LOG_RETENTION_DAYS: u64 = 7;
const LOG_FILE_PREFIX: &str = "pixpet.log";

/// Directory the rolling log files are written to.
///
/// `PIXPET_LOG_DIR` wins; otherwise `~/Library/Logs/pixpet` on macOS and
/// `<data dir>/pixpet/logs` elsewhere, falling back to `./logs`.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PIXPET_LOG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home.join("Library").join("Logs").join("pixpet");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(data) = dirs::data_dir() {
            return data.join("pixpet").join("logs");
        }
    }

    PathBuf::from("logs")
}

/// Delete rolled log files older than `max_age`.
///
/// Only names starting with the rolling prefix are considered, so a shared
/// directory keeps its other files.
fn prune_old_logs(dir: &Path, max_age: Duration) {
    let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
        return;
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .is_ok_and(|modified| modified < cutoff);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Layer copying every event into a [`LogBuffer`].
struct TailLayer {
    buffer: LogBuffer,
}

impl<S: tracing::Subscriber> Layer<S> for TailLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.buffer.push(LogEntry {
            level: (*event.metadata().level()).into(),
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        parts.extend(self.message);
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// Build the level filter: `PIXPET_LOG`, then `RUST_LOG`, then `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env("PIXPET_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install logging for the interactive pet. Returns the HUD tail buffer.
///
/// Events go to a daily-rolling file in [`log_dir`] (7-day retention) and to
/// the in-memory tail. The default level is `info` when `verbose`, `warn`
/// otherwise.
pub fn init(verbose: bool) -> LogBuffer {
    let buffer = LogBuffer::new(TAIL_CAPACITY);
    let filter = env_filter(if verbose { "info" } else { "warn" });

    let dir = log_dir();
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("warning: failed to create log directory {}: {err}", dir.display());
    }
    prune_old_logs(&dir, Duration::from_secs(LOG_RETENTION_DAYS * 86400));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(TailLayer {
            buffer: buffer.clone(),
        })
        .init();

    buffer
}

/// Install stderr-only logging for one-shot command-line tools.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
