//! Logger that prints through `env_logger` and keeps recent entries for the
//! editor console.

use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use log::Log;
use parking_lot::Mutex;

/// Entries kept by the console buffer.
pub const LOG_CAPACITY: usize = 10_000;

/// A single captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: log::Level,
    pub target: String,
    pub message: String,
    pub timestamp: Instant,
}

/// Ring buffer of captured log entries.
#[derive(Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    max_capacity: usize,
}

impl LogBuffer {
    pub fn new(max_capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_capacity.min(1024)),
            max_capacity,
        }
    }

    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    /// Messages at `level` or more severe, oldest first.
    pub fn messages_at(&self, level: log::Level) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.level <= level)
            .map(|e| e.message.as_str())
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.max_capacity == 0 {
            return;
        }
        if self.entries.len() >= self.max_capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

static LOG_BUFFER: OnceLock<Arc<Mutex<LogBuffer>>> = OnceLock::new();

/// The shared log buffer, once [`install`] has run.
pub fn log_buffer() -> Option<Arc<Mutex<LogBuffer>>> {
    LOG_BUFFER.get().cloned()
}

/// Custom logger that wraps `env_logger` and captures entries to the ring buffer.
struct LogCapture {
    inner: env_logger::Logger,
    buffer: Arc<Mutex<LogBuffer>>,
}

impl Log for LogCapture {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
            self.buffer.lock().push(LogEntry {
                level: record.level(),
                target: record.target().to_owned(),
                message: record.args().to_string(),
                timestamp: Instant::now(),
            });
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the capturing logger.
///
/// The filter defaults to `info` and follows `RUST_LOG`. Fails if a logger
/// is already installed.
pub fn install() -> Result<(), log::SetLoggerError> {
    let buffer = Arc::new(Mutex::new(LogBuffer::new(LOG_CAPACITY)));

    let inner =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let max_level = inner.filter();

    log::set_boxed_logger(Box::new(LogCapture {
        inner,
        buffer: buffer.clone(),
    }))?;
    log::set_max_level(max_level);
    // Only the first successful install reaches this point.
    let _ = LOG_BUFFER.set(buffer);
    Ok(())
}
