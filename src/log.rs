//! Free-function access to the process-wide logger
//!
//! ```no_run
//! use laplace_logger::log;
//!
//! // Before initialize(): Err(LoggerError::NotInitialized)
//! assert!(log::info("too early").is_err());
//! ```

use crate::core::{instance, LogLevel, Result};

/// Forward to the published logger, or fail with
/// [`LoggerError::NotInitialized`](crate::LoggerError::NotInitialized)
pub fn log(level: LogLevel, message: impl AsRef<str>) -> Result<()> {
    instance()?.log(level, message);
    Ok(())
}

pub fn debug(message: impl AsRef<str>) -> Result<()> {
    log(LogLevel::Debug, message)
}

pub fn info(message: impl AsRef<str>) -> Result<()> {
    log(LogLevel::Info, message)
}

pub fn warning(message: impl AsRef<str>) -> Result<()> {
    log(LogLevel::Warning, message)
}

pub fn error(message: impl AsRef<str>) -> Result<()> {
    log(LogLevel::Error, message)
}
