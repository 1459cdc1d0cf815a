//! # Laplace Logger
//!
//! One logger per process, two sinks, and captured standard streams.
//!
//! - **Daily file sink**: `<log_root>/<YYYY-MM-DD>/<app_name>.log`
//! - **Console sink**: the same `timestamp [LEVEL] [source] message` lines
//!   on stdout, with its own threshold
//! - **Captured stdout/stderr**: text written through [`stdout()`],
//!   [`stderr()`] or the [`log_println!`] family is echoed to the terminal
//!   once and persisted as an INFO record on the shared `root` source
//! - **Shortcut**: [`log::info`] and friends reach the published logger
//!   from anywhere

pub mod appenders;
pub mod core;
pub mod log;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        initialize, initialize_with, instance, AppLogger, Appender, LogEntry, LogLevel,
        LogSource, Logger, LoggerConfig, LoggerError, LoggerMetrics, Result, Streams,
        TimestampFormat,
    };
}

pub use crate::appenders::{configure_dual_sinks, ConsoleAppender, FileAppender};
pub use crate::core::{
    initialize, initialize_with, instance, is_initialized, stderr, stdout, AppLogger, Appender,
    CapturedStream, LogEntry, LogLevel, LogPaths, LogSource, Logger, LoggerConfig, LoggerError,
    LoggerMetrics, RecordOrigin, Result, StreamHandle, Streams, TimestampFormat, SHARED_SOURCE,
};
