//! Core logger types and traits

pub mod app_logger;
pub mod appender;
pub mod capture;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use app_logger::{
    initialize, initialize_with, instance, is_initialized, stderr, stdout, AppLogger, Streams,
};
pub use appender::Appender;
pub use capture::{CapturedStream, StreamHandle};
pub use config::{LogPaths, LoggerConfig, DEFAULT_CONSOLE_LEVEL, DEFAULT_FILE_LEVEL};
pub use error::{LoggerError, Result};
pub use log_entry::{LogEntry, RecordOrigin};
pub use log_level::LogLevel;
pub use logger::{LogSource, Logger, SHARED_SOURCE};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
