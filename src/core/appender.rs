//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Extra per-record filter applied after the sink's severity threshold
    fn accepts(&self, _entry: &LogEntry) -> bool {
        true
    }
}
