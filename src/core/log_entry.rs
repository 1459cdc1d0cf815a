//! Log entry structure

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::sync::Arc;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrigin {
    /// An explicit logging call
    #[default]
    Direct,
    /// Text written to an intercepted stdout/stderr stream. The terminal
    /// already shows it, so console sinks skip it.
    Captured,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub source: Arc<str>,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub origin: RecordOrigin,
    pub thread_id: String,
    pub thread_name: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, source: Arc<str>, message: impl AsRef<str>) -> Self {
        Self {
            level,
            source,
            message: message.as_ref().to_string(),
            timestamp: Local::now(),
            origin: RecordOrigin::Direct,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    pub fn with_origin(mut self, origin: RecordOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn is_captured(&self) -> bool {
        self.origin == RecordOrigin::Captured
    }

    /// Render `timestamp [LEVEL] [source] message`, without a line terminator
    pub fn format_line(&self, timestamp_format: &TimestampFormat) -> String {
        format!(
            "{} [{}] [{}] {}",
            timestamp_format.format(&self.timestamp),
            self.level,
            self.source,
            self.message
        )
    }
}
